//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The driver ticks a [`Game`] on a timer and reads it back for drawing.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snake;

// Re-export commonly used types
pub use action::{Direction, SnakeId};
pub use config::GameConfig;
pub use engine::{CollisionType, Game, GameEvent, TickOutcome};
pub use food::Food;
pub use grid::{Grid, Position};
pub use snake::Snake;
