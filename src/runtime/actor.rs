/*!
 * Actor Threads
 * Periodic "one unit of work, then sleep" loops
 */

use crate::core::errors::{SimError, SimResult};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Spawn a named OS thread that runs `tick` every `interval`
///
/// The shutdown flag is observed at the top of each iteration; pacing is
/// unconditional sleeping, never backpressure from another actor.
pub(crate) fn spawn_actor<F>(
    name: &'static str,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
    mut tick: F,
) -> SimResult<JoinHandle<()>>
where
    F: FnMut() + Send + 'static,
{
    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            debug!("{name} actor started, interval {interval:?}");
            while !shutdown.load(Ordering::Relaxed) {
                tick();
                thread::sleep(interval);
            }
            debug!("{name} actor stopped");
        })
        .map_err(|err| SimError::ActorStartup {
            actor: name.to_string(),
            reason: err.to_string(),
        })
}
