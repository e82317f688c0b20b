use thiserror::Error;

use super::action::SnakeId;
use super::state::SessionState;

/// Invariant violations inside the game core.
///
/// None of these are expected during normal play; they mean the roster or
/// the caller broke an assumption and the session cannot continue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no free cell left for food")]
    BoardFull,
    #[error("`{operation}` is not allowed while the session is {state:?}")]
    InvalidTransition {
        operation: &'static str,
        state: SessionState,
    },
    #[error("no snake with id {0:?} in this session")]
    UnknownSnake(SnakeId),
    #[error("snake {0:?} is dead but the round is still running")]
    DeadSnakeInPlay(SnakeId),
    #[error("results are only available once the session has ended")]
    ResultsUnavailable,
}
