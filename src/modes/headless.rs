//! Headless runner
//!
//! Drives one session on a virtual clock with no player input, so a round
//! plays out as fast as the CPU allows. Useful for smoke checks: the player
//! snakes run straight into a wall, the enemy (if any) chases food until
//! something ends the round.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::game::{GameConfig, GameSession, GameVariant, SessionEvent, SessionSnapshot};

/// Upper bound on scheduler callbacks before the run is declared stuck
const MAX_CALLBACKS: u64 = 100_000;

/// Outcome of a headless round
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessSummary {
    pub variant: String,
    pub results: Vec<String>,
    pub ticks: u64,
    pub food_eaten: usize,
    /// Sum of every delay the session asked for
    pub virtual_time_ms: u128,
    pub final_state: SessionSnapshot,
}

pub struct HeadlessMode {
    session: GameSession,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, variant: GameVariant) -> Result<Self> {
        let session = GameSession::start(variant, config)
            .with_context(|| format!("Failed to start {}", variant.title))?;
        Ok(Self { session })
    }

    /// Tick until the session stops asking for callbacks
    pub fn run(&mut self) -> Result<HeadlessSummary> {
        let mut virtual_time = Duration::ZERO;
        let mut food_eaten = 0;

        for _ in 0..MAX_CALLBACKS {
            let report = self.session.tick().context("Session tick failed")?;

            for event in &report.events {
                debug!(?event, "session event");
                if matches!(event, SessionEvent::FoodEaten { .. }) {
                    food_eaten += 1;
                }
            }

            match report.next_tick {
                Some(delay) => virtual_time += delay,
                None => {
                    let results = self
                        .session
                        .results()
                        .context("Session stopped without results")?
                        .to_vec();
                    info!(?results, ticks = self.session.ticks(), "headless round finished");
                    return Ok(HeadlessSummary {
                        variant: self.session.variant().title.to_string(),
                        results,
                        ticks: self.session.ticks(),
                        food_eaten,
                        virtual_time_ms: virtual_time.as_millis(),
                        final_state: self.session.snapshot(),
                    });
                }
            }
        }

        bail!("session still running after {MAX_CALLBACKS} callbacks")
    }
}
