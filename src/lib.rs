//! Retro Snake - a grid snake arcade game
//!
//! This library provides:
//! - Core game logic (game module): movement, collisions, food, power-ups,
//!   levels and chasing obstacles, driven one tick at a time
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive terminal game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
