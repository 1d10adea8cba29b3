/*!
 * Simulation State
 *
 * Owns the arena and both collections. Every engine operation takes
 * `&mut self`, so holding the one lock around a call gives the whole
 * observe-then-act sequence as a single critical section.
 */

use crate::block::{Block, BlockArena, BlockHandle, BlockList, Collection};
use crate::core::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Age, BlockId, Units};
use log::info;
use std::collections::HashSet;

/// The shared mutable resource domain: arena, free list, allocated list
#[derive(Debug)]
pub struct SimState {
    pub(super) arena: BlockArena,
    pub(super) free: BlockList,
    pub(super) allocated: BlockList,
    next_id: BlockId,
    block_size: Units,
    total_units: Units,
}

impl SimState {
    /// Partition the region into `initial_blocks` equal blocks, all free
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut state = Self {
            arena: BlockArena::with_capacity(config.initial_blocks)?,
            free: BlockList::new(Collection::Free),
            allocated: BlockList::new(Collection::Allocated),
            next_id: 0,
            block_size: config.block_size,
            total_units: config.total_units(),
        };
        for i in 0..config.initial_blocks {
            let id = state.fresh_id();
            let block = Block::new(id, i * config.block_size, config.block_size);
            let handle = state.arena.insert(block);
            state.free.append(&mut state.arena, handle)?;
        }
        info!(
            "region initialized: {} blocks x {} units ({} total)",
            config.initial_blocks, config.block_size, state.total_units
        );
        Ok(state)
    }

    /// Build a state with an explicit block layout
    ///
    /// Free blocks take the given sizes in order; allocated blocks take
    /// `(size, age)` pairs. Bases are laid out sequentially, free first.
    /// Useful for driving the engines from a known configuration.
    pub fn from_layout(
        block_size: Units,
        free: &[Units],
        allocated: &[(Units, Age)],
    ) -> SimResult<Self> {
        if block_size == 0 {
            return Err(SimError::InvalidConfig("block_size must be positive".into()));
        }
        if free.iter().chain(allocated.iter().map(|(s, _)| s)).any(|&s| s == 0) {
            return Err(SimError::InvalidConfig("block sizes must be positive".into()));
        }
        let mut state = Self {
            arena: BlockArena::with_capacity(free.len() + allocated.len())?,
            free: BlockList::new(Collection::Free),
            allocated: BlockList::new(Collection::Allocated),
            next_id: 0,
            block_size,
            total_units: 0,
        };
        let mut base = 0;
        for &size in free {
            let id = state.fresh_id();
            let handle = state.arena.insert(Block::new(id, base, size));
            state.free.append(&mut state.arena, handle)?;
            base += size;
        }
        for &(size, age) in allocated {
            let id = state.fresh_id();
            let mut block = Block::new(id, base, size);
            block.age = age;
            let handle = state.arena.insert(block);
            state.allocated.append(&mut state.arena, handle)?;
            base += size;
        }
        state.total_units = base;
        Ok(state)
    }

    pub fn free(&self) -> &BlockList {
        &self.free
    }

    pub fn allocated(&self) -> &BlockList {
        &self.allocated
    }

    pub fn arena(&self) -> &BlockArena {
        &self.arena
    }

    /// Fragment threshold used by the coalescer (the uniform initial size)
    pub fn block_size(&self) -> Units {
        self.block_size
    }

    /// Capacity of the whole simulated region
    pub fn total_units(&self) -> Units {
        self.total_units
    }

    /// Move a block to the other collection as one atomic step
    ///
    /// Entering the allocated collection resets residency age, per the
    /// block lifecycle.
    pub fn relocate(&mut self, handle: BlockHandle, target: Collection) -> SimResult<()> {
        let Self {
            arena,
            free,
            allocated,
            ..
        } = self;
        let (source, dest) = match target {
            Collection::Free => (allocated, free),
            Collection::Allocated => (free, allocated),
        };
        source.detach(arena, handle)?;
        dest.append(arena, handle)?;
        if target == Collection::Allocated {
            arena.get_mut(handle)?.age = 0;
        }
        Ok(())
    }

    pub(super) fn fresh_id(&mut self) -> BlockId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Audit every structural invariant
    ///
    /// Checks link agreement, membership tags, identity uniqueness, strictly
    /// positive sizes, and the conservation law. Cheap at simulation scale;
    /// tests run it after every operation.
    pub fn verify(&self) -> SimResult<()> {
        let (free_units, free_ids) = self.audit_list(&self.free)?;
        let (allocated_units, allocated_ids) = self.audit_list(&self.allocated)?;

        let member_count = free_ids.len() + allocated_ids.len();
        if member_count != self.arena.live() {
            return Err(SimError::LinkCorruption {
                detail: format!(
                    "{} blocks live in the arena but {} linked into collections",
                    self.arena.live(),
                    member_count
                ),
            });
        }

        let mut seen: HashSet<BlockId> = HashSet::with_capacity(member_count);
        for id in free_ids.iter().chain(allocated_ids.iter()) {
            if !seen.insert(*id) {
                return Err(SimError::LinkCorruption {
                    detail: format!("block id {id} appears twice"),
                });
            }
        }

        if free_units + allocated_units != self.total_units {
            return Err(SimError::LinkCorruption {
                detail: format!(
                    "conservation violated: {free_units} free + {allocated_units} allocated != {} total",
                    self.total_units
                ),
            });
        }
        Ok(())
    }

    fn audit_list(&self, list: &BlockList) -> SimResult<(Units, Vec<BlockId>)> {
        let mut visited: HashSet<BlockHandle> = HashSet::new();
        let mut prev: Option<BlockHandle> = None;
        let mut cursor = list.head();
        let mut units = 0;
        let mut ids = Vec::new();

        while let Some(handle) = cursor {
            if !visited.insert(handle) {
                return Err(SimError::LinkCorruption {
                    detail: format!("cycle in the {} collection", list.tag()),
                });
            }
            if self.arena.home(handle)? != Some(list.tag()) {
                let id = self.arena.get(handle)?.id;
                return Err(SimError::LinkCorruption {
                    detail: format!("block {id} linked into {} but homed elsewhere", list.tag()),
                });
            }
            if self.arena.prev_of(handle)? != prev {
                let id = self.arena.get(handle)?.id;
                return Err(SimError::LinkCorruption {
                    detail: format!("prev link of block {id} disagrees with its neighbor"),
                });
            }
            let block = self.arena.get(handle)?;
            if block.size == 0 {
                return Err(SimError::LinkCorruption {
                    detail: format!("block {} has zero size", block.id),
                });
            }
            units += block.size;
            ids.push(block.id);
            prev = Some(handle);
            cursor = self.arena.next_of(handle)?;
        }

        if list.tail() != prev {
            return Err(SimError::LinkCorruption {
                detail: format!("tail of the {} collection is dangling", list.tag()),
            });
        }
        if ids.len() != list.len() {
            return Err(SimError::LinkCorruption {
                detail: format!(
                    "{} collection reports {} members but walks {}",
                    list.tag(),
                    list.len(),
                    ids.len()
                ),
            });
        }
        Ok((units, ids))
    }
}
