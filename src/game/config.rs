use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::GameError;

/// What happens when the snake reaches the edge of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Leaving the grid ends the game
    Bounded,
    /// Coordinates wrap around to the opposite edge
    Wrapped,
}

/// Effect granted while a collected power-up is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpEffect {
    /// Only the countdown runs; nothing else changes
    TimerOnly,
    /// Obstacles stand still until the countdown ends
    FreezeObstacles,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Boundary behaviour, fixed for the whole game
    pub edge_policy: EdgePolicy,

    /// Level goes up once `score >= level * points_per_level`
    pub points_per_level: u32,

    /// Spawn `level` chasing obstacles on every level-up
    pub obstacles_enabled: bool,
    /// Obstacles farther than this (Manhattan) chase the head, closer ones wander
    pub chase_distance: i32,

    /// Spawn collectible power-ups
    pub power_ups_enabled: bool,
    /// Maximum power-ups on the board at once
    pub max_power_ups: usize,
    /// Per-tick probability of a new power-up appearing
    pub power_up_spawn_chance: f64,
    /// Ticks an effect lasts once collected
    pub power_up_duration: u32,
    pub power_up_effect: PowerUpEffect,

    /// Tick interval at level 1, in milliseconds
    pub initial_tick_ms: u64,
    /// Fastest allowed tick interval, in milliseconds
    pub min_tick_ms: u64,
    /// Interval reduction per level, in milliseconds
    pub speed_step_ms: u64,
    /// Shorten the tick interval on every level-up
    pub speed_up_per_level: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::hazards()
    }
}

impl GameConfig {
    /// Classic rules: walls kill, a level every 5 points and faster ticks per level,
    /// no obstacles or power-ups
    pub fn classic() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            edge_policy: EdgePolicy::Bounded,
            points_per_level: 5,
            obstacles_enabled: false,
            chase_distance: 2,
            power_ups_enabled: false,
            max_power_ups: 3,
            power_up_spawn_chance: 0.01,
            power_up_duration: 250,
            power_up_effect: PowerUpEffect::TimerOnly,
            initial_tick_ms: 250,
            min_tick_ms: 50,
            speed_step_ms: 50,
            speed_up_per_level: true,
        }
    }

    /// Hazard rules: wrapping edges, chasing obstacles, power-ups and a level
    /// every `level * 10` points at a constant speed
    pub fn hazards() -> Self {
        Self {
            edge_policy: EdgePolicy::Wrapped,
            points_per_level: 10,
            obstacles_enabled: true,
            power_ups_enabled: true,
            speed_up_per_level: false,
            ..Self::classic()
        }
    }

    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_ms)
    }

    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }

    /// Reject configurations that cannot produce a playable game
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return invalid("grid dimensions overflow i32 coordinates".to_string());
        }
        // The snake starts at the centre and trails to the left
        if self.initial_snake_length == 0 || self.initial_snake_length > self.grid_width / 2 + 1 {
            return invalid(format!(
                "initial snake length {} does not fit a grid {} cells wide",
                self.initial_snake_length, self.grid_width
            ));
        }
        if self.grid_width * self.grid_height <= self.initial_snake_length {
            return invalid("grid has no room for food".to_string());
        }
        if self.points_per_level == 0 {
            return invalid("points_per_level must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.power_up_spawn_chance) {
            return invalid(format!(
                "power_up_spawn_chance must be within [0, 1], got {}",
                self.power_up_spawn_chance
            ));
        }
        if self.min_tick_ms == 0 || self.min_tick_ms > self.initial_tick_ms {
            return invalid(format!(
                "min_tick_ms ({}) must be in 1..={}",
                self.min_tick_ms, self.initial_tick_ms
            ));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take default values
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize game config")
    }
}
