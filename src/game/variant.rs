//! Game modes as data: who is on the board, who can kill whom, and how the
//! round is scored.

use serde::{Deserialize, Serialize};

use super::action::{Controls, Direction, SnakeId};
use super::grid::Position;
use super::snake::{Pilot, Snake, SpawnSpec, Tint, clash};

pub const PLAYER_ONE: SnakeId = SnakeId(0);
pub const SECOND_SNAKE: SnakeId = SnakeId(1);

const PLAYER_ONE_SPAWN: SpawnSpec = SpawnSpec {
    position: Position::new(330, 330),
    direction: Direction::Right,
    tint: Tint::Green,
    pilot: Pilot::Player,
    self_deadly: true,
};

const ENEMY_SPAWN: SpawnSpec = SpawnSpec {
    position: Position::new(30, 30),
    direction: Direction::Right,
    tint: Tint::Purple,
    pilot: Pilot::Enemy,
    self_deadly: true,
};

const PLAYER_TWO_SPAWN: SpawnSpec = SpawnSpec {
    position: Position::new(300, 330),
    direction: Direction::Left,
    tint: Tint::Blue,
    pilot: Pilot::Player,
    self_deadly: true,
};

const SOLO_ROSTER: &[SpawnSpec] = &[PLAYER_ONE_SPAWN];
const ENEMY_ROSTER: &[SpawnSpec] = &[PLAYER_ONE_SPAWN, ENEMY_SPAWN];
const VERSUS_ROSTER: &[SpawnSpec] = &[PLAYER_ONE_SPAWN, PLAYER_TWO_SPAWN];

const NO_CLASHES: &[(SnakeId, SnakeId)] = &[];
const HEAD_TO_HEAD: &[(SnakeId, SnakeId)] = &[(PLAYER_ONE, SECOND_SNAKE)];

const ARROWS_ONLY: &[(Controls, SnakeId)] = &[(Controls::Arrows, PLAYER_ONE)];
const ARROWS_AND_WASD: &[(Controls, SnakeId)] =
    &[(Controls::Arrows, PLAYER_ONE), (Controls::Wasd, SECOND_SNAKE)];

/// The four selectable modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantKind {
    Classic,
    ClassicEnemy,
    TwoPlayer,
    Competitive,
}

/// How the end-of-round message is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoring {
    /// "GAME OVER" and player one's length
    Solo,
    /// Winner banner and both players' lengths
    Versus,
}

/// Complete description of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameVariant {
    pub kind: VariantKind,
    pub title: &'static str,
    /// Spawn order is also tick order; index is the snake's id
    pub roster: &'static [SpawnSpec],
    /// Pairs of snakes that are deadly to each other
    pub clashes: &'static [(SnakeId, SnakeId)],
    pub bindings: &'static [(Controls, SnakeId)],
    pub scoring: Scoring,
}

impl GameVariant {
    /// All modes in menu order
    pub const ALL: [GameVariant; 4] = [
        GameVariant::classic(),
        GameVariant::classic_enemy(),
        GameVariant::two_player(),
        GameVariant::competitive(),
    ];

    pub const fn classic() -> Self {
        Self {
            kind: VariantKind::Classic,
            title: "Classic Game",
            roster: SOLO_ROSTER,
            clashes: NO_CLASHES,
            bindings: ARROWS_ONLY,
            scoring: Scoring::Solo,
        }
    }

    pub const fn classic_enemy() -> Self {
        Self {
            kind: VariantKind::ClassicEnemy,
            title: "Classic Game with Enemy",
            roster: ENEMY_ROSTER,
            clashes: HEAD_TO_HEAD,
            bindings: ARROWS_ONLY,
            scoring: Scoring::Solo,
        }
    }

    pub const fn two_player() -> Self {
        Self {
            kind: VariantKind::TwoPlayer,
            title: "Two-Player Game - Passive",
            roster: VERSUS_ROSTER,
            clashes: NO_CLASHES,
            bindings: ARROWS_AND_WASD,
            scoring: Scoring::Versus,
        }
    }

    pub const fn competitive() -> Self {
        Self {
            kind: VariantKind::Competitive,
            title: "Two-Player Game - Aggressive",
            roster: VERSUS_ROSTER,
            clashes: HEAD_TO_HEAD,
            bindings: ARROWS_AND_WASD,
            scoring: Scoring::Versus,
        }
    }

    pub fn from_kind(kind: VariantKind) -> Self {
        match kind {
            VariantKind::Classic => Self::classic(),
            VariantKind::ClassicEnemy => Self::classic_enemy(),
            VariantKind::TwoPlayer => Self::two_player(),
            VariantKind::Competitive => Self::competitive(),
        }
    }

    /// Fresh snakes at their spawn cells with the deadly relation wired up
    pub fn build_roster(&self) -> Vec<Snake> {
        let mut snakes: Vec<Snake> = self
            .roster
            .iter()
            .enumerate()
            .map(|(index, spawn)| Snake::new(SnakeId(index), spawn))
            .collect();

        for &(a, b) in self.clashes {
            clash(&mut snakes, a, b);
        }

        snakes
    }

    /// The snake a key cluster steers in this mode, if any
    pub fn controlled_snake(&self, controls: Controls) -> Option<SnakeId> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == controls)
            .map(|&(_, id)| id)
    }

    /// End-of-round lines, top to bottom
    pub fn results(&self, snakes: &[Snake]) -> Vec<String> {
        let length = |id: SnakeId| snakes.get(id.0).map_or(0, Snake::len);

        match self.scoring {
            Scoring::Solo => vec![
                "GAME OVER".to_string(),
                format!("SCORE: {}", length(PLAYER_ONE)),
            ],
            Scoring::Versus => {
                let scores = [length(PLAYER_ONE), length(SECOND_SNAKE)];
                let mut lines = vec![versus_banner(scores[0], scores[1]).to_string()];
                lines.extend(
                    scores
                        .iter()
                        .enumerate()
                        .map(|(index, score)| format!("PLAYER {} SCORE: {}", index + 1, score)),
                );
                lines
            }
        }
    }

    /// Score shown in the metrics panel for this round
    pub fn headline_score(&self, snakes: &[Snake]) -> usize {
        match self.scoring {
            Scoring::Solo => snakes.get(PLAYER_ONE.0).map_or(0, Snake::len),
            Scoring::Versus => snakes.iter().map(Snake::len).max().unwrap_or(0),
        }
    }
}

/// Strictly longer snake wins; equal lengths draw
pub fn versus_banner(player_one: usize, player_two: usize) -> &'static str {
    use std::cmp::Ordering;

    match player_one.cmp(&player_two) {
        Ordering::Greater => "PLAYER 1 WINS!",
        Ordering::Less => "PLAYER 2 WINS!",
        Ordering::Equal => "DRAW!",
    }
}
