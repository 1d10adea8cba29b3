/*!
 * Reclamation Engine
 * Returns the longest-resident allocated block to the free collection
 */

use crate::block::Collection;
use crate::core::errors::SimResult;
use crate::core::types::{Age, BlockId, Units};
use crate::engine::coalesce::CoalesceStats;
use crate::engine::state::SimState;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What a single reclamation tick did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReclaimOutcome {
    /// Nothing was allocated
    Idle,
    /// The oldest resident moved back to the free collection
    Reclaimed {
        id: BlockId,
        size: Units,
        /// Residency age at the moment of reclamation
        age: Age,
        coalesce: CoalesceStats,
    },
}

impl SimState {
    /// Reclaim the allocated block with the greatest residency age
    ///
    /// Selection is by actual maximum age, not arrival order: split-derived
    /// insertions break simple FIFO ordering, so the head is only usually
    /// the oldest. Ties keep the earliest member in collection order. The
    /// selected block's age resets to 0, it relocates to the free
    /// collection, and a coalescing pass runs immediately after.
    pub fn reclaim_tick(&mut self) -> SimResult<ReclaimOutcome> {
        let mut oldest = None;
        let mut cursor = self.allocated.head();
        while let Some(handle) = cursor {
            let block = self.arena.get(handle)?;
            match oldest {
                Some((_, max_age)) if block.age <= max_age => {}
                _ => oldest = Some((handle, block.age)),
            }
            cursor = self.arena.next_of(handle)?;
        }

        let Some((handle, age)) = oldest else {
            debug!("reclamation: allocated collection is empty, skipping tick");
            return Ok(ReclaimOutcome::Idle);
        };

        let (id, size) = {
            let block = self.arena.get_mut(handle)?;
            block.age = 0;
            (block.id, block.size)
        };
        self.relocate(handle, Collection::Free)?;
        info!("reclaimed block {id} ({size} units) after {age} ticks of residency");

        let coalesce = self.coalesce()?;
        Ok(ReclaimOutcome::Reclaimed {
            id,
            size,
            age,
            coalesce,
        })
    }
}
