use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::game::VariantKind;

/// In-memory statistics for one run of the program
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    best_scores: HashMap<VariantKind, usize>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            best_scores: HashMap::new(),
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, variant: VariantKind, final_score: usize) {
        self.games_played += 1;
        let best = self.best_scores.entry(variant).or_insert(0);
        if final_score > *best {
            *best = final_score;
        }
    }

    pub fn best_score(&self, variant: VariantKind) -> usize {
        self.best_scores.get(&variant).copied().unwrap_or(0)
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
