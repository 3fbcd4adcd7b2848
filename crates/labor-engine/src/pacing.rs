//! Real-time pacing between ticks.
//!
//! The core runs ticks back to back; the engine slows the run down to a
//! watchable pace by sleeping in the tick callback.

use std::thread;
use std::time::Duration;

use labor_core::{TickCallback, TickSummary, World};
use tracing::debug;

/// Tick callback that sleeps for a fixed interval after every tick.
pub struct PacingCallback {
    interval: Duration,
}

impl PacingCallback {
    /// Pace ticks `interval_ms` milliseconds apart. Zero disables pacing.
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
        }
    }
}

impl TickCallback for PacingCallback {
    fn on_tick(&mut self, summary: &TickSummary, world: &World) {
        debug!(
            tick = summary.tick,
            hires = summary.hires,
            employed = world.employed_count(),
            competition = world.primary_competition(),
            "Tick delivered"
        );
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
    }
}
