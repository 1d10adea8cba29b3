/*!
 * Runtime Module
 * Actor threads and the simulation lifecycle
 */

mod actor;
mod simulation;

pub use simulation::{Simulation, SimulationHandle};
