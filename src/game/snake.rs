use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::action::{Direction, SnakeId};
use super::grid::{Position, in_bounds};

/// Lifecycle of a single snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeStatus {
    Alive,
    Dead,
}

/// Who decides where a snake goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pilot {
    /// Steered by keyboard input
    Player,
    /// Chases the food with a greedy heuristic every tick
    Enemy,
}

/// Display colour of a snake, interpreted by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Green,
    Purple,
    Blue,
}

/// What ended a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Head left the board
    Wall,
    /// Head landed on a segment of a deadly snake (possibly itself)
    Snake(SnakeId),
}

/// Result of advancing one snake by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { ate_food: bool },
    Collided(CollisionType),
    /// The snake was already dead; nothing happened
    Stalled,
}

impl StepOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, StepOutcome::Moved { .. })
    }
}

/// Where and how a snake enters the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSpec {
    pub position: Position,
    pub direction: Direction,
    pub tint: Tint,
    pub pilot: Pilot,
    /// Whether running into its own body is fatal
    pub self_deadly: bool,
}

/// Cells every snake held when the tick started, plus the heads placed since
///
/// Bodies are frozen once per tick, so a tail that moves away later in the
/// same tick still blocks. Each valid move claims its new head, so a later
/// snake can never end on a cell an earlier one just entered.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: Vec<HashSet<Position>>,
}

impl Occupancy {
    pub fn capture(snakes: &[Snake]) -> Self {
        Self {
            cells: snakes
                .iter()
                .map(|snake| snake.segments.iter().copied().collect())
                .collect(),
        }
    }

    pub fn is_occupied_by(&self, id: SnakeId, pos: Position) -> bool {
        self.cells
            .get(id.0)
            .is_some_and(|cells| cells.contains(&pos))
    }

    /// Record the cell `id` moved into during this tick
    pub fn claim_head(&mut self, id: SnakeId, pos: Position) {
        if let Some(cells) = self.cells.get_mut(id.0) {
            cells.insert(pos);
        }
    }
}

/// A snake on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub id: SnakeId,
    /// Oldest segment (tail) at the front, newest (head) at the back
    segments: VecDeque<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Latest accepted steering input, applied on the next step
    pending_direction: Option<Direction>,
    /// Snakes whose bodies end this one on contact
    deadly: Vec<SnakeId>,
    status: SnakeStatus,
    pub pilot: Pilot,
    pub tint: Tint,
}

impl Snake {
    /// Create a single-segment snake from its spawn description
    pub fn new(id: SnakeId, spawn: &SpawnSpec) -> Self {
        let mut snake = Self {
            id,
            segments: VecDeque::from([spawn.position]),
            direction: spawn.direction,
            pending_direction: None,
            deadly: Vec::new(),
            status: SnakeStatus::Alive,
            pilot: spawn.pilot,
            tint: spawn.tint,
        };
        if spawn.self_deadly {
            snake.deadly.push(id);
        }
        snake
    }

    /// Build a snake with an explicit body, tail first
    #[cfg(test)]
    pub(crate) fn with_body(
        id: SnakeId,
        spawn: &SpawnSpec,
        body: impl IntoIterator<Item = Position>,
    ) -> Self {
        let mut snake = Self::new(id, spawn);
        snake.segments = body.into_iter().collect();
        snake
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        // segments is never empty: built with one cell and only shifted or grown
        self.segments[self.segments.len() - 1]
    }

    /// Get the tail position
    pub fn tail(&self) -> Position {
        self.segments[0]
    }

    /// Segments from tail to head
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == SnakeStatus::Alive
    }

    pub fn deadly(&self) -> &[SnakeId] {
        &self.deadly
    }

    /// Record a steering intent for the next step.
    ///
    /// A one-cell snake may turn anywhere; a longer one ignores a turn
    /// straight back into its own neck.
    pub fn set_direction(&mut self, intent: Direction) {
        if !self.is_alive() {
            return;
        }
        if self.len() == 1 || !self.direction.is_opposite(intent) {
            self.pending_direction = Some(intent);
        }
    }

    /// Point the snake at the food: horizontal distance first, then vertical
    pub fn pursue(&mut self, food: Position) {
        self.direction = pursuit_direction(self.head(), food);
        self.pending_direction = None;
    }

    /// Make `other` deadly to this snake
    pub fn register_deadly(&mut self, other: SnakeId) {
        if !self.deadly.contains(&other) {
            self.deadly.push(other);
        }
    }

    /// Advance one cell, validating against the tick's occupancy
    pub fn step(&mut self, occupancy: &Occupancy, food: Position) -> StepOutcome {
        if !self.is_alive() {
            return StepOutcome::Stalled;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let new_head = self.head().moved_in_direction(self.direction);

        if let Some(collision) = self.check_collision(occupancy, new_head) {
            self.status = SnakeStatus::Dead;
            return StepOutcome::Collided(collision);
        }

        self.segments.push_back(new_head);
        let ate_food = new_head == food;
        if !ate_food {
            self.segments.pop_front();
        }

        StepOutcome::Moved { ate_food }
    }

    fn check_collision(&self, occupancy: &Occupancy, pos: Position) -> Option<CollisionType> {
        if !in_bounds(pos.x, pos.y) {
            return Some(CollisionType::Wall);
        }

        self.deadly
            .iter()
            .find(|&&id| occupancy.is_occupied_by(id, pos))
            .map(|&id| CollisionType::Snake(id))
    }
}

/// Make two snakes deadly to each other
pub fn clash(snakes: &mut [Snake], a: SnakeId, b: SnakeId) {
    snakes[a.0].register_deadly(b);
    snakes[b.0].register_deadly(a);
}

/// Greedy chase: close the horizontal gap first, then the vertical one
pub fn pursuit_direction(from: Position, food: Position) -> Direction {
    if from.x < food.x {
        Direction::Right
    } else if from.x > food.x {
        Direction::Left
    } else if from.y > food.y {
        Direction::Up
    } else {
        Direction::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: i32, y: i32, direction: Direction) -> Snake {
        Snake::new(
            SnakeId(0),
            &SpawnSpec {
                position: Position::new(x, y),
                direction,
                tint: Tint::Green,
                pilot: Pilot::Player,
                self_deadly: true,
            },
        )
    }

    fn far_food() -> Position {
        Position::new(30, 570)
    }

    fn advance(snake: &mut Snake, food: Position) -> StepOutcome {
        let occupancy = Occupancy::capture(std::slice::from_ref(snake));
        snake.step(&occupancy, food)
    }

    /// Grow a snake heading right to the given length
    fn grown_snake(length: usize) -> Snake {
        let mut snake = player_at(60, 330, Direction::Right);
        while snake.len() < length {
            let food = snake.head().moved_in_direction(Direction::Right);
            assert!(advance(&mut snake, food).is_valid());
        }
        snake
    }

    #[test]
    fn test_snake_creation() {
        let snake = player_at(330, 330, Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(330, 330));
        assert_eq!(snake.tail(), snake.head());
        assert_eq!(snake.deadly(), &[SnakeId(0)]);
        assert!(snake.is_alive());
    }

    #[test]
    fn test_single_segment_accepts_any_direction() {
        for intent in Direction::ALL {
            let mut snake = player_at(330, 330, Direction::Right);
            snake.set_direction(intent);
            assert_eq!(snake.pending_direction(), Some(intent));
        }
    }

    #[test]
    fn test_long_snake_rejects_only_reversal() {
        for intent in Direction::ALL {
            let mut snake = grown_snake(3);
            snake.set_direction(intent);
            if intent == Direction::Left {
                assert_eq!(snake.pending_direction(), None);
            } else {
                assert_eq!(snake.pending_direction(), Some(intent));
            }
        }
    }

    #[test]
    fn test_latest_accepted_intent_wins() {
        let mut snake = grown_snake(3);
        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Left); // reversal of the current direction
        assert_eq!(snake.pending_direction(), Some(Direction::Up));
        snake.set_direction(Direction::Down);
        assert_eq!(snake.pending_direction(), Some(Direction::Down));
    }

    #[test]
    fn test_shift_keeps_length() {
        let mut snake = grown_snake(3);
        let outcome = advance(&mut snake, far_food());
        assert_eq!(outcome, StepOutcome::Moved { ate_food: false });
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(150, 330));
        assert_eq!(snake.tail(), Position::new(90, 330));
    }

    #[test]
    fn test_eating_grows() {
        let mut snake = player_at(330, 330, Direction::Right);
        let outcome = advance(&mut snake, Position::new(360, 330));
        assert_eq!(outcome, StepOutcome::Moved { ate_food: true });
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.tail(), Position::new(330, 330));
    }

    #[test]
    fn test_wall_collision_leaves_segments() {
        let mut snake = player_at(600, 330, Direction::Right);
        let before: Vec<_> = snake.segments().copied().collect();

        let outcome = advance(&mut snake, far_food());

        assert_eq!(outcome, StepOutcome::Collided(CollisionType::Wall));
        assert!(!outcome.is_valid());
        assert_eq!(snake.status(), SnakeStatus::Dead);
        assert_eq!(snake.segments().copied().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_every_edge_is_fatal() {
        let cases = [
            (30, 330, Direction::Left),
            (600, 330, Direction::Right),
            (330, 30, Direction::Up),
            (330, 600, Direction::Down),
        ];
        for (x, y, direction) in cases {
            let mut snake = player_at(x, y, direction);
            assert_eq!(
                advance(&mut snake, far_food()),
                StepOutcome::Collided(CollisionType::Wall)
            );
        }
    }

    #[test]
    fn test_self_collision() {
        let mut snake = grown_snake(5);
        // Right-turn loop: down, left, up lands on an old body cell
        snake.set_direction(Direction::Down);
        assert!(advance(&mut snake, far_food()).is_valid());
        snake.set_direction(Direction::Left);
        assert!(advance(&mut snake, far_food()).is_valid());
        snake.set_direction(Direction::Up);
        let outcome = advance(&mut snake, far_food());

        assert_eq!(outcome, StepOutcome::Collided(CollisionType::Snake(SnakeId(0))));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_moving_into_own_tail_is_fatal() {
        // Pre-move snapshot still holds the tail cell
        let mut snake = grown_snake(4);
        snake.set_direction(Direction::Down);
        advance(&mut snake, far_food());
        snake.set_direction(Direction::Left);
        advance(&mut snake, far_food());
        snake.set_direction(Direction::Up);
        let outcome = advance(&mut snake, far_food());
        assert_eq!(outcome, StepOutcome::Collided(CollisionType::Snake(SnakeId(0))));
    }

    #[test]
    fn test_not_self_deadly_passes_through_itself() {
        let mut snake = grown_snake(5);
        snake.deadly.clear();
        snake.set_direction(Direction::Down);
        advance(&mut snake, far_food());
        snake.set_direction(Direction::Left);
        advance(&mut snake, far_food());
        snake.set_direction(Direction::Up);
        assert!(advance(&mut snake, far_food()).is_valid());
    }

    #[test]
    fn test_dead_snake_does_not_move() {
        let mut snake = player_at(600, 330, Direction::Right);
        advance(&mut snake, far_food());
        snake.set_direction(Direction::Up);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(advance(&mut snake, far_food()), StepOutcome::Stalled);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(600, 330));
    }

    #[test]
    fn test_clash_is_symmetric() {
        let mut snakes = vec![
            player_at(330, 330, Direction::Right),
            Snake::new(
                SnakeId(1),
                &SpawnSpec {
                    position: Position::new(30, 30),
                    direction: Direction::Right,
                    tint: Tint::Purple,
                    pilot: Pilot::Enemy,
                    self_deadly: true,
                },
            ),
        ];
        clash(&mut snakes, SnakeId(0), SnakeId(1));
        clash(&mut snakes, SnakeId(0), SnakeId(1));
        assert_eq!(snakes[0].deadly(), &[SnakeId(0), SnakeId(1)]);
        assert_eq!(snakes[1].deadly(), &[SnakeId(1), SnakeId(0)]);
    }

    #[test]
    fn test_pursuit_prefers_horizontal() {
        let head = Position::new(300, 300);
        assert_eq!(pursuit_direction(head, Position::new(330, 30)), Direction::Right);
        assert_eq!(pursuit_direction(head, Position::new(60, 570)), Direction::Left);
        assert_eq!(pursuit_direction(head, Position::new(300, 30)), Direction::Up);
        assert_eq!(pursuit_direction(head, Position::new(300, 570)), Direction::Down);
    }

    #[test]
    fn test_pursue_overrides_pending_input() {
        let mut snake = player_at(300, 300, Direction::Right);
        snake.set_direction(Direction::Up);
        snake.pursue(Position::new(30, 300));
        assert_eq!(snake.direction(), Direction::Left);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_claimed_head_blocks_later_snake() {
        let mut first = player_at(300, 330, Direction::Right);
        let mut second = Snake::new(
            SnakeId(1),
            &SpawnSpec {
                position: Position::new(360, 330),
                direction: Direction::Left,
                tint: Tint::Blue,
                pilot: Pilot::Player,
                self_deadly: true,
            },
        );
        second.register_deadly(SnakeId(0));

        let mut occupancy = Occupancy::capture(&[first.clone(), second.clone()]);
        assert!(first.step(&occupancy, far_food()).is_valid());
        occupancy.claim_head(first.id, first.head());

        assert_eq!(
            second.step(&occupancy, far_food()),
            StepOutcome::Collided(CollisionType::Snake(SnakeId(0)))
        );
        assert_eq!(second.head(), Position::new(360, 330));
    }
}
