/*!
 * memsim - Main Entry Point
 *
 * Builds the simulated region, spawns the four actors, and runs until
 * MEMSIM_RUN_SECS elapses (or indefinitely when unset).
 */

use std::error::Error;
use std::time::Duration;

use log::info;
use memsim::{SimConfig, Simulation};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("memsim starting...");

    let config = SimConfig::from_env()?;
    info!(
        "region: {} blocks x {} units, demand {}..={} units, base tick {:?}",
        config.initial_blocks, config.block_size, config.demand_min, config.demand_max, config.tick
    );

    let run_for = match std::env::var("MEMSIM_RUN_SECS") {
        Ok(raw) => Some(Duration::from_secs(raw.parse()?)),
        Err(_) => None,
    };

    let simulation = Simulation::new(config)?;
    let handle = simulation.spawn()?;

    match run_for {
        Some(duration) => {
            info!("running for {duration:?}");
            std::thread::sleep(duration);
            handle.shutdown();
            handle.join()?;
            info!("clean shutdown");
        }
        None => {
            // Runs until externally terminated
            handle.join()?;
        }
    }

    Ok(())
}
