/*!
 * Aging Clock
 * Advances the residency age of every allocated block
 */

use crate::core::errors::SimResult;
use crate::engine::state::SimState;
use log::debug;

impl SimState {
    /// Increment the age of every allocated block by one tick
    ///
    /// Pure per-block increment; topology is untouched. Returns how many
    /// blocks aged.
    pub fn age_tick(&mut self) -> SimResult<usize> {
        let mut aged = 0;
        let mut cursor = self.allocated.head();
        while let Some(handle) = cursor {
            self.arena.get_mut(handle)?.age += 1;
            aged += 1;
            cursor = self.arena.next_of(handle)?;
        }
        if aged > 0 {
            debug!("aging clock advanced {aged} resident blocks");
        }
        Ok(aged)
    }
}
