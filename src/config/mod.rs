#![warn(clippy::all, clippy::pedantic)]

pub mod loader;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::game::{EASY_MOVE_INTERVAL_MS, HARD_MOVE_INTERVAL_MS, NORMAL_MOVE_INTERVAL_MS};

/// Fall speed setting. Unknown names fall back to [`Difficulty::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "easy" | "simple" | "简单" => Difficulty::Easy,
            "normal" | "普通" => Difficulty::Normal,
            "hard" | "困难" => Difficulty::Hard,
            other => {
                warn!("Unknown difficulty {other:?}, falling back to normal");
                Difficulty::Normal
            }
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Milliseconds between gravity steps for a piece at this difficulty.
    #[must_use]
    pub fn move_interval_ms(self) -> u64 {
        match self {
            Difficulty::Easy => EASY_MOVE_INTERVAL_MS,
            Difficulty::Normal => NORMAL_MOVE_INTERVAL_MS,
            Difficulty::Hard => HARD_MOVE_INTERVAL_MS,
        }
    }
}

impl From<String> for Difficulty {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.name().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub difficulty: Difficulty,
    pub show_grid: bool,
    // Fixed RNG seed for reproducible runs; a fresh seed is drawn when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            show_grid: true,
            seed: None,
        }
    }
}

impl Config {
    /// Loads the configuration file, falling back to defaults on any failure.
    #[must_use]
    pub fn load() -> Self {
        match loader::load_config_from_file() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load configuration, using defaults: {e}");
                Self::default()
            }
        }
    }
}
