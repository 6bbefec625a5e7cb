//! Twin Snake - a terminal Snake game where a second player joins once the
//! score is high enough
//!
//! This library provides:
//! - Core game logic (game module)
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Session stats (metrics module)
//! - The interactive driver (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
