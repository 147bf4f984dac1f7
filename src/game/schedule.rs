use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

use super::config::GameConfig;

/// Tick pacing as a function of the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    initial: Duration,
    min: Duration,
    step: Duration,
    speed_up: bool,
}

impl TickSchedule {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            initial: config.initial_tick_interval(),
            min: config.min_tick_interval(),
            step: Duration::from_millis(config.speed_step_ms),
            speed_up: config.speed_up_per_level,
        }
    }

    /// Interval between ticks at `level`, never below the configured floor
    pub fn interval_for_level(&self, level: u32) -> Duration {
        if !self.speed_up {
            return self.initial;
        }
        let reduction = self.step.saturating_mul(level.saturating_sub(1));
        self.initial.saturating_sub(reduction).max(self.min)
    }
}

/// A tokio interval that treats each tick as a soft deadline: a late tick
/// fires once and the schedule restarts from there, with no burst of
/// catch-up ticks.
pub fn ticker(period: Duration) -> Interval {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
