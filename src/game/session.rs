use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::action::{Controls, Direction, SnakeId};
use super::config::{END_TOGGLE_INTERVAL, END_TOGGLES, GameConfig, TICK_INTERVAL};
use super::error::GameError;
use super::food::FoodSpawner;
use super::grid::Position;
use super::snake::{Occupancy, Pilot, Snake, StepOutcome};
use super::state::{SessionEvent, SessionSnapshot, SessionState, SnakeView, TickReport};
use super::variant::GameVariant;

/// One round of one variant: owns the snakes, the food and the clock state.
///
/// Nothing here runs on its own. An external scheduler calls [`tick`] and
/// honours the returned delay; input only records intents that the next
/// tick consumes.
///
/// [`tick`]: GameSession::tick
pub struct GameSession<R = StdRng> {
    variant: GameVariant,
    config: GameConfig,
    spawner: FoodSpawner<R>,
    snakes: Vec<Snake>,
    food: Position,
    state: SessionState,
    snakes_hidden: bool,
    results: Option<Vec<String>>,
    ticks: u64,
}

impl GameSession<StdRng> {
    /// Set up a round, seeding food placement from the config when given
    pub fn start(variant: GameVariant, config: GameConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::start_with_rng(variant, config, rng)
    }
}

impl<R: Rng> GameSession<R> {
    pub fn start_with_rng(
        variant: GameVariant,
        config: GameConfig,
        rng: R,
    ) -> Result<Self, GameError> {
        let mut session = Self {
            variant,
            config,
            spawner: FoodSpawner::new(rng),
            snakes: Vec::new(),
            food: Position::new(0, 0),
            state: SessionState::Closed,
            snakes_hidden: false,
            results: None,
            ticks: 0,
        };
        session.setup()?;
        info!(variant = session.variant.title, "session started");
        Ok(session)
    }

    /// Shared by start and reset: fresh roster, fresh food, running
    fn setup(&mut self) -> Result<(), GameError> {
        self.snakes = self.variant.build_roster();
        self.food = self.spawner.spawn(&self.snakes)?;
        self.state = SessionState::Running;
        self.snakes_hidden = false;
        self.results = None;
        self.ticks = 0;
        Ok(())
    }

    /// Advance the session by one scheduler callback
    pub fn tick(&mut self) -> Result<TickReport, GameError> {
        let mut events = Vec::new();

        let next_tick = match self.state {
            SessionState::Paused => Some(TICK_INTERVAL),
            SessionState::Running => {
                self.ticks += 1;
                if self.advance_snakes(&mut events)? {
                    Some(TICK_INTERVAL)
                } else {
                    self.begin_end_sequence()
                }
            }
            SessionState::Ending { remaining_toggles } => {
                self.toggle_visibility(remaining_toggles, &mut events)
            }
            SessionState::Ended | SessionState::Closed => None,
        };

        Ok(TickReport { next_tick, events })
    }

    /// Move the snakes in roster order, validated against the bodies as they
    /// stood when the tick began. Stops at the first fatal move, leaving the
    /// rest of the roster where it was. Returns false if a move was fatal.
    fn advance_snakes(&mut self, events: &mut Vec<SessionEvent>) -> Result<bool, GameError> {
        let mut occupancy = Occupancy::capture(&self.snakes);

        for index in 0..self.snakes.len() {
            let snake = &mut self.snakes[index];
            if snake.pilot == Pilot::Enemy {
                snake.pursue(self.food);
            }

            match snake.step(&occupancy, self.food) {
                StepOutcome::Moved { ate_food } => {
                    occupancy.claim_head(snake.id, snake.head());
                    if ate_food {
                        debug!(snake = snake.id.0, length = snake.len(), "food eaten");
                        events.push(SessionEvent::FoodEaten {
                            snake: snake.id,
                            position: self.food,
                        });
                        self.food = self.spawner.spawn(&self.snakes)?;
                        events.push(SessionEvent::FoodSpawned {
                            position: self.food,
                        });
                    }
                }
                StepOutcome::Collided(cause) => {
                    info!(snake = snake.id.0, ?cause, length = snake.len(), "snake died");
                    events.push(SessionEvent::SnakeDied {
                        snake: snake.id,
                        cause,
                    });
                    return Ok(false);
                }
                StepOutcome::Stalled => return Err(GameError::DeadSnakeInPlay(snake.id)),
            }
        }

        Ok(true)
    }

    fn begin_end_sequence(&mut self) -> Option<Duration> {
        info!(tick = self.ticks, "round over, starting end sequence");
        self.state = SessionState::Ending {
            remaining_toggles: END_TOGGLES,
        };
        Some(END_TOGGLE_INTERVAL)
    }

    fn toggle_visibility(
        &mut self,
        remaining_toggles: u8,
        events: &mut Vec<SessionEvent>,
    ) -> Option<Duration> {
        self.snakes_hidden = !self.snakes_hidden;
        events.push(SessionEvent::VisibilityToggled {
            hidden: self.snakes_hidden,
        });

        let remaining_toggles = remaining_toggles.saturating_sub(1);
        if remaining_toggles == 0 {
            self.finish(events);
            None
        } else {
            self.state = SessionState::Ending { remaining_toggles };
            Some(END_TOGGLE_INTERVAL)
        }
    }

    fn finish(&mut self, events: &mut Vec<SessionEvent>) {
        let results = self.variant.results(&self.snakes);
        info!(?results, "session ended");
        events.push(SessionEvent::RoundOver {
            results: results.clone(),
        });
        self.results = Some(results);
        self.state = SessionState::Ended;
    }

    /// Record a steering intent for one snake; applied on the next tick
    pub fn set_direction(&mut self, id: SnakeId, direction: Direction) -> Result<(), GameError> {
        let snake = self
            .snakes
            .get_mut(id.0)
            .ok_or(GameError::UnknownSnake(id))?;

        if matches!(self.state, SessionState::Running | SessionState::Paused) {
            snake.set_direction(direction);
        }
        Ok(())
    }

    /// Route a key cluster to the snake it steers in this variant
    pub fn steer(&mut self, controls: Controls, direction: Direction) -> Result<(), GameError> {
        match self.variant.controlled_snake(controls) {
            Some(id) => self.set_direction(id, direction),
            None => Ok(()),
        }
    }

    /// Toggle between running and paused; ignored once the round is over
    pub fn pause(&mut self) {
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            other => other,
        };
        debug!(state = ?self.state, "pause toggled");
    }

    /// Start the same variant over; only allowed once the round has ended
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.require_ended("reset")?;
        self.setup()?;
        info!(variant = self.variant.title, "session reset");
        Ok(())
    }

    /// Tear the session down so the caller can show the menu again
    pub fn return_to_menu(&mut self) -> Result<(), GameError> {
        self.require_ended("return_to_menu")?;
        self.snakes.clear();
        self.results = None;
        self.state = SessionState::Closed;
        info!(variant = self.variant.title, "session closed");
        Ok(())
    }

    fn require_ended(&self, operation: &'static str) -> Result<(), GameError> {
        if self.state == SessionState::Ended {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                operation,
                state: self.state,
            })
        }
    }

    /// End-of-round lines; only available in [`SessionState::Ended`]
    pub fn results(&self) -> Result<&[String], GameError> {
        match (&self.state, &self.results) {
            (SessionState::Ended, Some(results)) => Ok(results),
            _ => Err(GameError::ResultsUnavailable),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            title: self.variant.title.to_string(),
            state: self.state,
            food: self.food,
            snakes: self.snakes.iter().map(SnakeView::from).collect(),
            snakes_hidden: self.snakes_hidden,
            ticks: self.ticks,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn variant(&self) -> &GameVariant {
        &self.variant
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn snakes_hidden(&self) -> bool {
        self.snakes_hidden
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Score used for high-score tracking
    pub fn headline_score(&self) -> usize {
        self.variant.headline_score(&self.snakes)
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, position: Position) {
        self.food = position;
    }
}
