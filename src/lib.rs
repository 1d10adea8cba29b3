/*!
 * memsim Library
 *
 * Simulation of a fixed-size memory region under classical OS-style block
 * management: a first-fit allocator with splitting, a reclaimer that
 * evicts the longest resident, a coalescer that folds fragments back into
 * free capacity, an aging clock, and a read-only inspector - four
 * independent actors sharing two ordered block collections behind one
 * lock.
 */

pub mod block;
pub mod core;
pub mod engine;
pub mod runtime;

// Re-exports
pub use self::block::{Block, BlockArena, BlockHandle, BlockList, Collection};
pub use self::core::config::SimConfig;
pub use self::core::errors::{SimError, SimResult};
pub use self::core::limits;
pub use self::engine::{
    AllocOutcome, BlockView, CoalesceStats, DemandSource, FixedDemand, ReclaimOutcome, SimState,
    Snapshot, UniformDemand,
};
pub use self::runtime::{Simulation, SimulationHandle};
