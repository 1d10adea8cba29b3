/*!
 * Allocation Demand
 * Opaque source of requested block sizes
 */

use crate::core::config::SimConfig;
use crate::core::types::Units;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of per-tick allocation request sizes
///
/// The allocation engine treats the distribution as an opaque
/// collaborator; tests substitute deterministic implementations.
pub trait DemandSource: Send {
    fn next_demand(&mut self) -> Units;
}

/// Uniform demand in a bounded inclusive range
pub struct UniformDemand {
    min: Units,
    max: Units,
    rng: StdRng,
}

impl UniformDemand {
    pub fn new(min: Units, max: Units) -> Self {
        Self {
            min,
            max,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for reproducible runs
    pub fn seeded(min: Units, max: Units, seed: u64) -> Self {
        Self {
            min,
            max,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.demand_min, config.demand_max)
    }
}

impl DemandSource for UniformDemand {
    fn next_demand(&mut self) -> Units {
        self.rng.gen_range(self.min..=self.max)
    }
}

/// Constant demand, for tests and demos
pub struct FixedDemand(pub Units);

impl DemandSource for FixedDemand {
    fn next_demand(&mut self) -> Units {
        self.0
    }
}
