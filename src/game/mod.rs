//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies,
//! apart from the tick pacing helpers in [`schedule`]. A driver owns a
//! [`GameEngine`], calls [`GameEngine::tick`] on a timer and forwards input.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod obstacle;
pub mod power_up;
pub mod schedule;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{EdgePolicy, GameConfig, PowerUpEffect};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::GameError;
pub use grid::Grid;
pub use schedule::TickSchedule;
pub use state::{CollisionType, GameOverReason, GameSnapshot, GameStatus, Position, Snake};
