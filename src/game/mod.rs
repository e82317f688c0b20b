//! Core game logic for grid Snake
//!
//! This module contains the simulation without any I/O or rendering
//! dependencies. A scheduler drives it through [`GameSession::tick`] and a
//! presentation layer reads [`GameSession::snapshot`].

pub mod action;
pub mod config;
pub mod error;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;
pub mod state;
pub mod variant;

// Re-export commonly used types
pub use action::{Action, Controls, Direction, SnakeId};
pub use config::{END_TOGGLE_INTERVAL, END_TOGGLES, GameConfig, TICK_INTERVAL};
pub use error::GameError;
pub use food::FoodSpawner;
pub use grid::{CELL_SIZE, MAX_COORD, MIN_COORD, Position, in_bounds};
pub use session::GameSession;
pub use snake::{CollisionType, Occupancy, Pilot, Snake, SnakeStatus, SpawnSpec, StepOutcome, Tint};
pub use state::{SessionEvent, SessionSnapshot, SessionState, SnakeView, TickReport};
pub use variant::{GameVariant, Scoring, VariantKind};
