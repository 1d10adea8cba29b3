/*!
 * Inspector Snapshot
 * Read-only view of both collections for reporting
 */

use crate::block::BlockList;
use crate::core::types::{Age, BlockId, Offset, Units};
use crate::engine::state::SimState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One block as the inspector reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    pub id: BlockId,
    pub base: Offset,
    pub size: Units,
    pub age: Age,
}

/// Point-in-time listing of both collections, in collection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub free: Vec<BlockView>,
    pub allocated: Vec<BlockView>,
    pub total_units: Units,
}

impl Snapshot {
    pub fn free_units(&self) -> Units {
        self.free.iter().map(|b| b.size).sum()
    }

    pub fn allocated_units(&self) -> Units {
        self.allocated.iter().map(|b| b.size).sum()
    }

    /// Whether the conservation law holds for this snapshot
    pub fn conserves(&self) -> bool {
        self.free_units() + self.allocated_units() == self.total_units
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "memory report ({} units total)", self.total_units)?;
        write_collection(f, "free", &self.free)?;
        write_collection(f, "allocated", &self.allocated)
    }
}

fn write_collection(f: &mut fmt::Formatter, name: &str, blocks: &[BlockView]) -> fmt::Result {
    if blocks.is_empty() {
        return writeln!(f, "  {name}: empty");
    }
    writeln!(f, "  {name}:")?;
    for block in blocks {
        writeln!(
            f,
            "    block {:>3}  base {:>6}  size {:>5}  age {:>4}",
            block.id, block.base, block.size, block.age
        )?;
    }
    Ok(())
}

impl SimState {
    /// Capture both collections without mutating anything
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            free: self.view_of(&self.free),
            allocated: self.view_of(&self.allocated),
            total_units: self.total_units(),
        }
    }

    fn view_of(&self, list: &BlockList) -> Vec<BlockView> {
        list.iter(self.arena())
            .map(|(_, b)| BlockView {
                id: b.id,
                base: b.base,
                size: b.size,
                age: b.age,
            })
            .collect()
    }
}
