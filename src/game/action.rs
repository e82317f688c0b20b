use serde::{Deserialize, Serialize};

use super::grid::CELL_SIZE;

/// Direction a snake can travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Velocity (vx, vy) in board units, one cell per tick
    pub fn velocity(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -CELL_SIZE),
            Direction::Down => (0, CELL_SIZE),
            Direction::Left => (-CELL_SIZE, 0),
            Direction::Right => (CELL_SIZE, 0),
        }
    }
}

/// Index of a snake inside its session's roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnakeId(pub usize);

/// Which key cluster a steering input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Controls {
    Arrows,
    Wasd,
}

/// Command delivered to a running session by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Steer(Controls, Direction),
    Pause,
    Restart,
    Menu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_velocity() {
        assert_eq!(Direction::Up.velocity(), (0, -30));
        assert_eq!(Direction::Down.velocity(), (0, 30));
        assert_eq!(Direction::Left.velocity(), (-30, 0));
        assert_eq!(Direction::Right.velocity(), (30, 0));
    }
}
