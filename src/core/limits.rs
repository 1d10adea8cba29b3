/*!
 * Simulation Limits and Constants
 *
 * Centralized location for the simulator's defaults and tick ratios.
 */

use crate::core::types::Units;
use std::time::Duration;

// =============================================================================
// REGION SHAPE
// =============================================================================

/// Initial number of blocks the region is partitioned into
/// Small on purpose: every inspector dump stays readable
pub const DEFAULT_INITIAL_BLOCKS: usize = 3;

/// Uniform size of each initial block, in address units
/// Doubles as the fragment threshold for the coalescer
pub const DEFAULT_BLOCK_SIZE: Units = 1024;

// =============================================================================
// ALLOCATION DEMAND
// =============================================================================

/// Lower bound of the uniform demand distribution (inclusive)
pub const DEFAULT_DEMAND_MIN: Units = 10;

/// Upper bound of the uniform demand distribution (inclusive)
/// Kept well under DEFAULT_BLOCK_SIZE so the split path is the common case
pub const DEFAULT_DEMAND_MAX: Units = 50;

// =============================================================================
// ACTOR PACING
// =============================================================================

/// Base tick duration; every actor interval is a multiple of this
pub const DEFAULT_TICK: Duration = Duration::from_millis(250);

/// Allocation engine runs every tick
pub const ALLOCATION_TICKS: u32 = 1;

/// Aging clock runs every tick
pub const AGING_TICKS: u32 = 1;

/// Reclamation runs every second tick
pub const RECLAIM_TICKS: u32 = 2;

/// Inspector dumps both collections every fifth tick
pub const INSPECT_TICKS: u32 = 5;
