/*!
 * Core Types
 * Common types used across the simulator
 */

/// Block identifier, unique for the lifetime of the process
pub type BlockId = u64;

/// Offset into the simulated address space
pub type Offset = usize;

/// Size in simulated address units
pub type Units = usize;

/// Residency age in aging-clock ticks
pub type Age = u64;
