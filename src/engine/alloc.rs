/*!
 * Allocation Engine
 * First-fit scan with block splitting
 */

use crate::block::{Block, Collection};
use crate::core::errors::SimResult;
use crate::core::types::{BlockId, Units};
use crate::engine::state::SimState;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What a single allocation tick did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AllocOutcome {
    /// An oversized block was split; the remainder stays free
    Split {
        parent: BlockId,
        child: BlockId,
        requested: Units,
        remainder: Units,
    },
    /// A whole block was relocated into the allocated collection
    Whole {
        id: BlockId,
        size: Units,
        requested: Units,
    },
    /// No free block could satisfy the request this tick
    NoFit { requested: Units },
}

impl AllocOutcome {
    /// Whether the tick changed shared state
    pub fn serviced(&self) -> bool {
        !matches!(self, AllocOutcome::NoFit { .. })
    }
}

impl SimState {
    /// Service one allocation request of `demand` units
    ///
    /// Scans the free collection in order for the first block with
    /// `size > demand`. An oversized candidate (`size > 2 * demand`) is
    /// split: it shrinks in place and a new block takes over the tail end
    /// of its original extent. Otherwise the whole candidate relocates.
    /// No fit is a normal no-op, not an error.
    pub fn allocate_tick(&mut self, demand: Units) -> SimResult<AllocOutcome> {
        let mut candidate = None;
        let mut cursor = self.free.head();
        while let Some(handle) = cursor {
            if self.arena.get(handle)?.size > demand {
                candidate = Some(handle);
                break;
            }
            cursor = self.arena.next_of(handle)?;
        }

        let Some(handle) = candidate else {
            debug!("allocation: no free block larger than {demand} units, skipping tick");
            return Ok(AllocOutcome::NoFit { requested: demand });
        };

        let candidate_size = self.arena.get(handle)?.size;
        if candidate_size > 2 * demand {
            // Shrink in place; the new block owns the vacated tail range
            let child_id = self.fresh_id();
            let parent = self.arena.get_mut(handle)?;
            parent.size -= demand;
            let parent_id = parent.id;
            let remainder = parent.size;
            let child_base = parent.base + parent.size;

            let child = self.arena.insert(Block::new(child_id, child_base, demand));
            self.allocated.append(&mut self.arena, child)?;

            info!(
                "allocated {demand} units: split block {parent_id} (remainder {remainder}), new block {child_id} at base {child_base}"
            );
            Ok(AllocOutcome::Split {
                parent: parent_id,
                child: child_id,
                requested: demand,
                remainder,
            })
        } else {
            let id = self.arena.get(handle)?.id;
            self.relocate(handle, Collection::Allocated)?;
            info!("allocated {demand} units: whole block {id} ({candidate_size} units) relocated");
            Ok(AllocOutcome::Whole {
                id,
                size: candidate_size,
                requested: demand,
            })
        }
    }
}
