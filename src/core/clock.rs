//! Per-session simulation clock.

/// Elapsed simulation ticks for one game session.
///
/// Created when a session starts and reset on restart. Only the owning game
/// advances it, once per simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    /// Interval between ticks in milliseconds. Snake shortens this as it eats.
    pub tick_interval_ms: u64,
    /// Ticks elapsed since the session started.
    pub elapsed: u64,
}

impl SimulationClock {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            tick_interval_ms,
            elapsed: 0,
        }
    }

    /// Advance by one tick and return the new count.
    pub fn advance(&mut self) -> u64 {
        self.elapsed += 1;
        self.elapsed
    }

    /// Simulated time in milliseconds, assuming a constant interval.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed * self.tick_interval_ms
    }

    pub fn reset(&mut self, tick_interval_ms: u64) {
        *self = Self::new(tick_interval_ms);
    }
}
