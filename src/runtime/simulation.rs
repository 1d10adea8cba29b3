/*!
 * Simulation Runtime
 *
 * Wires the four actors - allocator, reclaimer, aging clock, inspector -
 * to the shared state. One `parking_lot::Mutex` guards the whole resource
 * domain; every actor takes it for exactly one engine call per tick.
 * There is no message passing: coordination is entirely through the
 * shared collections and the lock.
 */

use crate::core::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::engine::{DemandSource, SimState, Snapshot, UniformDemand};
use crate::runtime::actor::spawn_actor;
use log::{error, info, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// A constructed simulation, ready to spawn its actors
pub struct Simulation {
    config: SimConfig,
    state: Arc<Mutex<SimState>>,
}

impl Simulation {
    /// Build the initial region described by `config`
    pub fn new(config: SimConfig) -> SimResult<Self> {
        let state = SimState::new(&config)?;
        Ok(Self {
            config,
            state: Arc::new(Mutex::new(state)),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot()
    }

    /// Spawn the four actors with the configured uniform demand
    pub fn spawn(self) -> SimResult<SimulationHandle> {
        let demand = Box::new(UniformDemand::from_config(&self.config));
        self.spawn_with_demand(demand)
    }

    /// Spawn the four actors with a caller-supplied demand source
    ///
    /// Allocator, reclaimer, and inspector startup failures are fatal.
    /// The aging clock is downgraded to a warning: without it residency
    /// ages stop advancing, which degrades reclamation's selection but
    /// corrupts nothing.
    pub fn spawn_with_demand(
        self,
        mut demand: Box<dyn DemandSource>,
    ) -> SimResult<SimulationHandle> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut threads: Vec<(&'static str, JoinHandle<()>)> = Vec::new();

        let state = Arc::clone(&self.state);
        let allocator = spawn_actor(
            "allocator",
            self.config.allocation_interval(),
            Arc::clone(&shutdown),
            move || {
                let units = demand.next_demand();
                if let Err(err) = state.lock().allocate_tick(units) {
                    error!("allocator integrity failure: {err}");
                    panic!("allocator integrity failure: {err}");
                }
            },
        )?;
        threads.push(("allocator", allocator));

        let state = Arc::clone(&self.state);
        let reclaimer = spawn_actor(
            "reclaimer",
            self.config.reclaim_interval(),
            Arc::clone(&shutdown),
            move || {
                if let Err(err) = state.lock().reclaim_tick() {
                    error!("reclaimer integrity failure: {err}");
                    panic!("reclaimer integrity failure: {err}");
                }
            },
        )?;
        threads.push(("reclaimer", reclaimer));

        let state = Arc::clone(&self.state);
        match spawn_actor(
            "aging-clock",
            self.config.aging_interval(),
            Arc::clone(&shutdown),
            move || {
                if let Err(err) = state.lock().age_tick() {
                    error!("aging clock integrity failure: {err}");
                    panic!("aging clock integrity failure: {err}");
                }
            },
        ) {
            Ok(handle) => threads.push(("aging-clock", handle)),
            Err(err) => warn!("aging clock unavailable, residency ages will not advance: {err}"),
        }

        let state = Arc::clone(&self.state);
        let report_json = std::env::var("MEMSIM_REPORT_JSON")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);
        let inspector = spawn_actor(
            "inspector",
            self.config.inspect_interval(),
            Arc::clone(&shutdown),
            move || {
                let snap = state.lock().snapshot();
                if report_json {
                    match serde_json::to_string(&snap) {
                        Ok(line) => info!("{line}"),
                        Err(err) => warn!("inspector could not serialize snapshot: {err}"),
                    }
                } else {
                    info!("{snap}");
                }
            },
        )?;
        threads.push(("inspector", inspector));

        info!("simulation running with {} actors", threads.len());
        Ok(SimulationHandle {
            shutdown,
            threads,
            state: self.state,
        })
    }
}

/// Running simulation: shutdown signal plus the actor join handles
pub struct SimulationHandle {
    shutdown: Arc<AtomicBool>,
    threads: Vec<(&'static str, JoinHandle<()>)>,
    state: Arc<Mutex<SimState>>,
}

impl SimulationHandle {
    /// Ask every actor to stop at the top of its next iteration
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        info!("shutdown requested");
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot()
    }

    /// Audit the shared state's invariants
    pub fn verify(&self) -> SimResult<()> {
        self.state.lock().verify()
    }

    /// Wait for every actor to exit
    ///
    /// Reports the first actor that terminated abnormally, after joining
    /// the rest.
    pub fn join(self) -> SimResult<()> {
        let mut failed = None;
        for (name, handle) in self.threads {
            if handle.join().is_err() && failed.is_none() {
                failed = Some(name);
            }
        }
        match failed {
            Some(actor) => Err(SimError::ActorPanicked {
                actor: actor.to_string(),
            }),
            None => Ok(()),
        }
    }
}
