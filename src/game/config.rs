use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Delay between two ticks while running or paused
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Delay between two visibility toggles of the end sequence
pub const END_TOGGLE_INTERVAL: Duration = Duration::from_millis(200);

/// Visibility toggles shown before the result
pub const END_TOGGLES: u8 = 6;

/// Per-run configuration
///
/// Board geometry and the clock are fixed (see [`crate::game::grid`] and the
/// constants above); only the food seed can be chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed for food placement; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Read a JSON configuration file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
