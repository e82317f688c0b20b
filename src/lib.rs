//! Grid Snake - a multi-mode Snake game
//!
//! This library provides:
//! - The deterministic game core (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Per-run statistics (metrics module)
//! - Interactive and headless runners (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
