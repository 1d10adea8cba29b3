/*!
 * Block Arena
 *
 * Slot-based storage for every live block. Collections never own blocks;
 * they link handles into the arena, so a block moves between collections
 * without its storage moving. Handles carry a generation so a handle that
 * outlives its block (absorbed by the coalescer) is caught instead of
 * silently resolving to a recycled slot.
 */

use crate::block::types::{Block, Collection};
use crate::core::errors::{SimError, SimResult};

/// Stable reference to a block in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    index: u32,
    generation: u32,
}

/// Intrusive list state kept alongside each block
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Links {
    pub(super) home: Option<Collection>,
    pub(super) prev: Option<BlockHandle>,
    pub(super) next: Option<BlockHandle>,
}

#[derive(Debug)]
struct Entry {
    block: Block,
    links: Links,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Storage for all live blocks, addressed by stable handles
#[derive(Debug)]
pub struct BlockArena {
    slots: Vec<Slot>,
    vacant: Vec<u32>,
    live: usize,
}

impl BlockArena {
    /// Reserve storage for the initial block population
    ///
    /// Failure to obtain memory here is fatal at startup; the simulation
    /// cannot proceed without its initial state.
    pub fn with_capacity(blocks: usize) -> SimResult<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(blocks)
            .map_err(|err| SimError::ResourceExhaustion {
                reason: format!("arena of {blocks} blocks: {err}"),
            })?;
        Ok(Self {
            slots,
            vacant: Vec::new(),
            live: 0,
        })
    }

    /// Place a block in the arena, unlinked from any collection
    pub fn insert(&mut self, block: Block) -> BlockHandle {
        self.live += 1;
        match self.vacant.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entry = Some(Entry {
                    block,
                    links: Links::default(),
                });
                BlockHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(Entry {
                        block,
                        links: Links::default(),
                    }),
                });
                BlockHandle {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Destroy a block's identity and return its final state
    ///
    /// The block must already be detached from its collection.
    pub fn remove(&mut self, handle: BlockHandle) -> SimResult<Block> {
        let entry = self.entry(handle)?;
        if let Some(home) = entry.links.home {
            return Err(SimError::LinkCorruption {
                detail: format!(
                    "block {} removed while still linked into {home}",
                    entry.block.id
                ),
            });
        }
        let slot = &mut self.slots[handle.index as usize];
        let entry = slot.entry.take().ok_or(SimError::StaleHandle {
            index: handle.index,
            generation: handle.generation,
        })?;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(handle.index);
        self.live -= 1;
        Ok(entry.block)
    }

    pub fn get(&self, handle: BlockHandle) -> SimResult<&Block> {
        Ok(&self.entry(handle)?.block)
    }

    pub fn get_mut(&mut self, handle: BlockHandle) -> SimResult<&mut Block> {
        Ok(&mut self.entry_mut(handle)?.block)
    }

    /// Collection the block is currently resident in, if any
    pub fn home(&self, handle: BlockHandle) -> SimResult<Option<Collection>> {
        Ok(self.entry(handle)?.links.home)
    }

    /// Successor of `handle` within its collection
    pub fn next_of(&self, handle: BlockHandle) -> SimResult<Option<BlockHandle>> {
        Ok(self.entry(handle)?.links.next)
    }

    /// Predecessor of `handle` within its collection
    pub fn prev_of(&self, handle: BlockHandle) -> SimResult<Option<BlockHandle>> {
        Ok(self.entry(handle)?.links.prev)
    }

    /// Number of live blocks across both collections
    pub fn live(&self) -> usize {
        self.live
    }

    pub(super) fn links(&self, handle: BlockHandle) -> SimResult<&Links> {
        Ok(&self.entry(handle)?.links)
    }

    pub(super) fn links_mut(&mut self, handle: BlockHandle) -> SimResult<&mut Links> {
        Ok(&mut self.entry_mut(handle)?.links)
    }

    fn entry(&self, handle: BlockHandle) -> SimResult<&Entry> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
            .ok_or(SimError::StaleHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }

    fn entry_mut(&mut self, handle: BlockHandle) -> SimResult<&mut Entry> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_mut())
            .ok_or(SimError::StaleHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }
}
