use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::debug;

use super::error::GameError;
use super::grid::{Position, food_cells};
use super::snake::Snake;

/// Places the single food pellet on a free cell
#[derive(Debug)]
pub struct FoodSpawner<R> {
    rng: R,
}

impl<R: Rng> FoodSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Pick a cell uniformly among those no snake segment covers
    pub fn spawn(&mut self, snakes: &[Snake]) -> Result<Position, GameError> {
        let occupied: HashSet<Position> = snakes
            .iter()
            .flat_map(|snake| snake.segments().copied())
            .collect();

        let position = food_cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(&mut self.rng)
            .ok_or(GameError::BoardFull)?;

        debug!(x = position.x, y = position.y, "food spawned");
        Ok(position)
    }
}
