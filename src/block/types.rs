/*!
 * Block Types
 * The atomic unit of the simulated address space
 */

use crate::core::types::{Age, BlockId, Offset, Units};
use serde::{Deserialize, Serialize};

/// A contiguous unit of simulated address space
///
/// `base` and `size` are base/limit-register bookkeeping; no real storage
/// backs the extent. `age` counts aging-clock ticks since the block last
/// became resident in the allocated collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub base: Offset,
    pub size: Units,
    pub age: Age,
}

impl Block {
    pub fn new(id: BlockId, base: Offset, size: Units) -> Self {
        Self {
            id,
            base,
            size,
            age: 0,
        }
    }
}

/// The two collections a block can be resident in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Free,
    Allocated,
}

impl Collection {
    /// The collection a relocated block leaves behind
    pub fn other(self) -> Self {
        match self {
            Collection::Free => Collection::Allocated,
            Collection::Allocated => Collection::Free,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Collection::Free => write!(f, "free"),
            Collection::Allocated => write!(f, "allocated"),
        }
    }
}
