/*!
 * Engine Module
 * The block-management engine: allocation, reclamation, coalescing,
 * aging, and read-only inspection over the shared state
 */

pub mod aging;
pub mod alloc;
pub mod coalesce;
pub mod demand;
pub mod reclaim;
pub mod snapshot;
pub mod state;

pub use alloc::AllocOutcome;
pub use coalesce::CoalesceStats;
pub use demand::{DemandSource, FixedDemand, UniformDemand};
pub use reclaim::ReclaimOutcome;
pub use snapshot::{BlockView, Snapshot};
pub use state::SimState;
