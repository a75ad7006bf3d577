//! Per-position step history.

use crate::core::types::Tick;

/// Accumulated trampling state for one block position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockHistory {
    /// Qualifying steps since the last reset. Always at least 1.
    pub step_count: u32,
    /// Tick of the most recent qualifying step.
    pub last_step_tick: Tick,
}

impl BlockHistory {
    /// History after a first step at `now`.
    pub fn new(now: Tick) -> Self {
        Self::with_count(1, now)
    }

    pub fn with_count(step_count: u32, now: Tick) -> Self {
        Self { step_count, last_step_tick: now }
    }

    /// Whether a step at `now` falls outside `timeout_ticks`. A timeout of 0
    /// never expires.
    pub fn is_expired(&self, now: Tick, timeout_ticks: Tick) -> bool {
        timeout_ticks > 0 && now.saturating_sub(self.last_step_tick) > timeout_ticks
    }

    /// Record another step at `now`, either restarting the count at 1 when
    /// the previous step timed out or incrementing it.
    ///
    /// Returns the resulting count and whether it was reset.
    pub fn record_step(&mut self, now: Tick, timeout_ticks: Tick) -> (u32, bool) {
        let reset = self.is_expired(now, timeout_ticks);
        self.step_count = if reset { 1 } else { self.step_count.saturating_add(1) };
        self.last_step_tick = now;
        (self.step_count, reset)
    }
}
