/*!
 * Coalescer
 * Folds free fragments back into a capacity reservoir
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::types::Units;
use crate::engine::state::SimState;
use log::info;
use serde::{Deserialize, Serialize};

/// Result of one coalescing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoalesceStats {
    /// Fragments absorbed (their identities are gone)
    pub absorbed: usize,
    /// Capacity transferred into the reservoir
    pub folded_units: Units,
}

impl CoalesceStats {
    pub fn absorbed_any(&self) -> bool {
        self.absorbed > 0
    }
}

impl SimState {
    /// Absorb undersized free blocks into the head of the free collection
    ///
    /// The first free member acts as the capacity reservoir. Every other
    /// member whose size is under the uniform initial block size is a
    /// fragment: its capacity transfers to the reservoir and its identity
    /// is destroyed. With at most one member, nothing happens.
    ///
    /// Absorption is by capacity, not spatial adjacency; after a pass the
    /// reservoir's extent is bookkeeping, not a contiguity claim.
    pub fn coalesce(&mut self) -> SimResult<CoalesceStats> {
        let mut stats = CoalesceStats::default();
        let Some(reservoir) = self.free.head() else {
            return Ok(stats);
        };

        let mut cursor = self.arena.next_of(reservoir)?;
        while let Some(handle) = cursor {
            cursor = self.arena.next_of(handle)?;
            if self.arena.get(handle)?.size < self.block_size() {
                self.free.detach(&mut self.arena, handle)?;
                let fragment = self.arena.remove(handle)?;
                let kept = self.arena.get_mut(reservoir)?;
                kept.size = kept.size.checked_add(fragment.size).ok_or_else(|| {
                    SimError::LinkCorruption {
                        detail: format!("reservoir {} size overflow", kept.id),
                    }
                })?;
                stats.absorbed += 1;
                stats.folded_units += fragment.size;
            }
        }

        if stats.absorbed_any() {
            let reservoir_id = self.arena.get(reservoir)?.id;
            info!(
                "coalesced {} fragments ({} units) into block {reservoir_id}",
                stats.absorbed, stats.folded_units
            );
        }
        Ok(stats)
    }
}
