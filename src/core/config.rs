/*!
 * Simulation Configuration
 * Runtime parameters with compile-time defaults and environment overrides
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::limits;
use crate::core::types::Units;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulation parameters
///
/// Defaults mirror the constants in [`crate::core::limits`]; the binary
/// layers `MEMSIM_*` environment overrides on top via [`SimConfig::from_env`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of equal blocks the region is partitioned into at startup
    pub initial_blocks: usize,
    /// Size of each initial block; also the coalescer's fragment threshold
    pub block_size: Units,
    /// Inclusive lower bound of the allocation demand distribution
    pub demand_min: Units,
    /// Inclusive upper bound of the allocation demand distribution
    pub demand_max: Units,
    /// Base tick duration; actor intervals are fixed multiples of this
    pub tick: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_blocks: limits::DEFAULT_INITIAL_BLOCKS,
            block_size: limits::DEFAULT_BLOCK_SIZE,
            demand_min: limits::DEFAULT_DEMAND_MIN,
            demand_max: limits::DEFAULT_DEMAND_MAX,
            tick: limits::DEFAULT_TICK,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_blocks(mut self, blocks: usize) -> Self {
        self.initial_blocks = blocks;
        self
    }

    pub fn with_block_size(mut self, size: Units) -> Self {
        self.block_size = size;
        self
    }

    pub fn with_demand_bounds(mut self, min: Units, max: Units) -> Self {
        self.demand_min = min;
        self.demand_max = max;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Build a configuration from defaults plus `MEMSIM_*` environment overrides
    ///
    /// Recognized variables: `MEMSIM_BLOCKS`, `MEMSIM_BLOCK_SIZE`,
    /// `MEMSIM_TICK_MS`. Unset variables keep their defaults; unparsable
    /// values are configuration errors.
    pub fn from_env() -> SimResult<Self> {
        let mut config = Self::default();
        if let Some(blocks) = read_env("MEMSIM_BLOCKS")? {
            config.initial_blocks = blocks;
        }
        if let Some(size) = read_env("MEMSIM_BLOCK_SIZE")? {
            config.block_size = size;
        }
        if let Some(ms) = read_env("MEMSIM_TICK_MS")? {
            config.tick = Duration::from_millis(ms as u64);
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations the simulation cannot start from
    pub fn validate(&self) -> SimResult<()> {
        if self.initial_blocks == 0 {
            return Err(SimError::InvalidConfig(
                "initial_blocks must be at least 1".into(),
            ));
        }
        if self.block_size == 0 {
            return Err(SimError::InvalidConfig("block_size must be positive".into()));
        }
        if self.demand_min == 0 {
            return Err(SimError::InvalidConfig("demand_min must be positive".into()));
        }
        if self.demand_min > self.demand_max {
            return Err(SimError::InvalidConfig(format!(
                "demand bounds inverted: {} > {}",
                self.demand_min, self.demand_max
            )));
        }
        Ok(())
    }

    /// Total capacity of the simulated region in address units
    pub fn total_units(&self) -> Units {
        self.initial_blocks * self.block_size
    }

    pub fn allocation_interval(&self) -> Duration {
        self.tick * limits::ALLOCATION_TICKS
    }

    pub fn aging_interval(&self) -> Duration {
        self.tick * limits::AGING_TICKS
    }

    pub fn reclaim_interval(&self) -> Duration {
        self.tick * limits::RECLAIM_TICKS
    }

    pub fn inspect_interval(&self) -> Duration {
        self.tick * limits::INSPECT_TICKS
    }
}

fn read_env(name: &str) -> SimResult<Option<usize>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|_| SimError::InvalidConfig(format!("{name}={raw} is not a number"))),
        Err(_) => Ok(None),
    }
}
