use super::config::PowerUpEffect;

/// Countdown for the effect of the last collected power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpTimer {
    effect: PowerUpEffect,
    remaining: u32,
}

impl PowerUpTimer {
    pub fn new(effect: PowerUpEffect) -> Self {
        Self {
            effect,
            remaining: 0,
        }
    }

    /// Start the effect, or restart it if one is already running
    pub fn activate(&mut self, duration: u32) {
        self.remaining = duration;
    }

    /// Advance by one tick
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether obstacles are held in place this tick
    pub fn freezes_obstacles(&self) -> bool {
        self.is_active() && self.effect == PowerUpEffect::FreezeObstacles
    }
}
