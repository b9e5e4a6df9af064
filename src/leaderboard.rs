#![warn(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use bevy_ecs::prelude::Resource;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::game::LEADERBOARD_SIZE;

// Environment variable that overrides the leaderboard location
pub const LEADERBOARD_PATH_ENV: &str = "SKILLBLOCKS_LEADERBOARD";

// Fallback path when no data directory is available
const LEADERBOARD_FILE_PATH: &str = "skillblocks-leaderboard.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    /// Seconds since the Unix epoch when the score was recorded
    pub recorded_at: u64,
}

impl LeaderboardEntry {
    /// UTC date and time of the entry, or `-` when the timestamp is out of range.
    #[must_use]
    pub fn recorded_label(&self) -> String {
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
        i64::try_from(self.recorded_at)
            .ok()
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
            .and_then(|at| at.format(format).ok())
            .unwrap_or_else(|| "-".to_string())
    }
}

// TOML needs a table at the top level
#[derive(Debug, Default, Serialize, Deserialize)]
struct LeaderboardFile {
    #[serde(default)]
    entries: Vec<LeaderboardEntry>,
}

/// Top scores, highest first, persisted as TOML.
#[derive(Resource, Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Opens the leaderboard at `path`. A missing or unreadable file yields an empty board.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                if path.exists() {
                    warn!("Ignoring unreadable leaderboard {}: {e:#}", path.display());
                }
                Vec::new()
            }
        };

        let mut leaderboard = Self { path, entries };
        leaderboard.normalize();
        leaderboard
    }

    /// Opens the leaderboard at the default location.
    #[must_use]
    pub fn open_default() -> Self {
        Self::open(default_path())
    }

    fn read_entries(path: &Path) -> Result<Vec<LeaderboardEntry>> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let file: LeaderboardFile =
            toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
        Ok(file.entries)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|entry| entry.score)
    }

    /// Records a score with the current time. Returns its 1-based rank, or `None` if it
    /// did not make the board.
    pub fn add_score(&mut self, score: u32) -> Option<usize> {
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        self.add_entry(LeaderboardEntry { score, recorded_at })
    }

    /// Inserts an entry, keeping the board sorted and trimmed. Earlier entries win ties.
    pub fn add_entry(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let index = self
            .entries
            .iter()
            .position(|existing| existing.score < entry.score)
            .unwrap_or(self.entries.len());

        if index >= LEADERBOARD_SIZE {
            return None;
        }

        self.entries.insert(index, entry);
        self.entries.truncate(LEADERBOARD_SIZE);
        info!("Score {} entered the leaderboard at #{}", entry.score, index + 1);
        Some(index + 1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let file = LeaderboardFile {
            entries: self.entries.clone(),
        };
        let contents = toml::to_string_pretty(&file).context("serializing leaderboard")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    fn normalize(&mut self) {
        // Stable sort keeps the recorded order for equal scores
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_SIZE);
    }
}

/// Resolves the leaderboard path: environment override, then the user's data directory,
/// then the working directory.
#[must_use]
pub fn default_path() -> PathBuf {
    if let Ok(path) = std::env::var(LEADERBOARD_PATH_ENV) {
        return PathBuf::from(path);
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("skillblocks").join("leaderboard.toml"),
        None => PathBuf::from(LEADERBOARD_FILE_PATH),
    }
}
