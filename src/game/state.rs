use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::action::SnakeId;
use super::grid::Position;
use super::snake::{CollisionType, Snake, Tint};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Running,
    Paused,
    /// Post-collision flashing; counts down once per scheduler callback
    Ending { remaining_toggles: u8 },
    /// Round is over and results are available
    Ended,
    /// Torn down after returning to the menu; ticks are ignored
    Closed,
}

impl SessionState {
    pub fn is_over(&self) -> bool {
        matches!(self, SessionState::Ended | SessionState::Closed)
    }
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SessionEvent {
    FoodEaten { snake: SnakeId, position: Position },
    FoodSpawned { position: Position },
    SnakeDied { snake: SnakeId, cause: CollisionType },
    VisibilityToggled { hidden: bool },
    RoundOver { results: Vec<String> },
}

/// What a tick did and when the scheduler should call again
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickReport {
    /// `None` means the session no longer needs ticks
    pub next_tick: Option<Duration>,
    pub events: Vec<SessionEvent>,
}

/// Read-only view of one snake for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnakeView {
    pub id: SnakeId,
    pub tint: Tint,
    /// Tail first, head last
    pub segments: Vec<Position>,
    pub alive: bool,
}

impl From<&Snake> for SnakeView {
    fn from(snake: &Snake) -> Self {
        Self {
            id: snake.id,
            tint: snake.tint,
            segments: snake.segments().copied().collect(),
            alive: snake.is_alive(),
        }
    }
}

impl SnakeView {
    pub fn head(&self) -> Option<Position> {
        self.segments.last().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Everything the presentation layer needs to draw a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub title: String,
    pub state: SessionState,
    pub food: Position,
    pub snakes: Vec<SnakeView>,
    pub snakes_hidden: bool,
    pub ticks: u64,
}
