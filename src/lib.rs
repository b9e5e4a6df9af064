pub mod app;
pub mod components;
pub mod config;
pub mod factory;
pub mod game;
pub mod grid;
pub mod input;
pub mod leaderboard;
pub mod piece;
pub mod session;
pub mod skill;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::Instant;

/// Frame clock. The session runs on milliseconds since the clock was created.
#[derive(Resource, Debug, Clone)]
pub struct Time {
    started: Instant,
    last_update: Instant,
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_update: now,
        }
    }

    pub fn update(&mut self) {
        self.last_update = Instant::now();
    }

    /// Milliseconds between creation and the last `update`.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.last_update.duration_since(self.started).as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
