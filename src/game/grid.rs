//! Board geometry shared by the core and the presentation layer.
//!
//! Coordinates are in board units, not cell indices: every cell is
//! `CELL_SIZE` wide and the playable area starts after a one-cell border.

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// Width and height of one cell in board units
pub const CELL_SIZE: i32 = 30;

/// Smallest coordinate a segment may take on either axis
pub const MIN_COORD: i32 = 30;

/// Largest coordinate a segment may take on either axis
pub const MAX_COORD: i32 = 600;

/// Largest coordinate food may be placed at on either axis
pub const MAX_FOOD_COORD: i32 = 570;

/// Number of cells along one axis of the playable area
pub const CELLS_PER_SIDE: usize = ((MAX_COORD - MIN_COORD) / CELL_SIZE + 1) as usize;

/// A position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.velocity();
        self.moved_by(dx, dy)
    }

    /// Zero-based (column, row) of this position inside the playable area
    pub fn cell_index(&self) -> (usize, usize) {
        (
            ((self.x - MIN_COORD) / CELL_SIZE) as usize,
            ((self.y - MIN_COORD) / CELL_SIZE) as usize,
        )
    }
}

/// Whether `(x, y)` lies inside the playable area
pub fn in_bounds(x: i32, y: i32) -> bool {
    (MIN_COORD..=MAX_COORD).contains(&x) && (MIN_COORD..=MAX_COORD).contains(&y)
}

/// Every cell food may be placed on, row by row
pub fn food_cells() -> impl Iterator<Item = Position> {
    (MIN_COORD..=MAX_FOOD_COORD)
        .step_by(CELL_SIZE as usize)
        .flat_map(|x| {
            (MIN_COORD..=MAX_FOOD_COORD)
                .step_by(CELL_SIZE as usize)
                .map(move |y| Position::new(x, y))
        })
}
