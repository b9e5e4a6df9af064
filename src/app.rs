#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{error, info};

use crate::Time;
use crate::config::Config;
use crate::input::{Command, InputEvent};
use crate::leaderboard::Leaderboard;
use crate::session::{GameSession, SessionEvent};

/// Loaded configuration, shared with the renderer.
#[derive(Resource, Debug, Clone)]
pub struct Settings(pub Config);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Playing,
    Leaderboard,
}

/// What the host loop needs to know after a frame.
#[derive(Debug, Default)]
pub struct FrameReport {
    pub events: Vec<SessionEvent>,
    pub celebrate: bool,
}

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub view: View,
    pub celebrating: bool,
    // Rank of the last finished game on the leaderboard, if it placed
    pub last_rank: Option<usize>,
}

impl App {
    #[must_use]
    pub fn new(config: Config, leaderboard: Leaderboard) -> Self {
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        info!("Starting session with seed {seed} on {}", config.difficulty.name());

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(GameSession::new(&config, seed));
        world.insert_resource(leaderboard);
        world.insert_resource(Settings(config));

        Self {
            world,
            should_quit: false,
            view: View::Playing,
            celebrating: false,
            last_rank: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        self.world.resource::<GameSession>()
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        self.world.resource::<Leaderboard>()
    }

    #[must_use]
    pub fn settings(&self) -> &Config {
        &self.world.resource::<Settings>().0
    }

    /// Advances the clock and runs one frame with the given commands.
    pub fn frame(&mut self, commands: &[Command]) -> FrameReport {
        let now_ms = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.elapsed_ms()
        };
        self.frame_at(now_ms, commands)
    }

    /// Runs one frame at an explicit time.
    pub fn frame_at(&mut self, now_ms: u64, commands: &[Command]) -> FrameReport {
        let mut inputs: Vec<InputEvent> = Vec::new();

        for &command in commands {
            match command {
                Command::Game(input) => inputs.push(input),
                Command::Restart => self.restart(now_ms),
                Command::ToggleLeaderboard => {
                    self.view = match self.view {
                        View::Playing => View::Leaderboard,
                        View::Leaderboard => View::Playing,
                    };
                }
                Command::ClearLeaderboard => {
                    if self.view == View::Leaderboard {
                        self.clear_leaderboard();
                    }
                }
                Command::Quit => self.should_quit = true,
            }
        }

        let mut report = FrameReport::default();
        if self.should_quit || self.view != View::Playing {
            return report;
        }

        report.events = self.world.resource_mut::<GameSession>().frame(now_ms, &inputs);

        for event in &report.events {
            match *event {
                SessionEvent::Milestone { .. } => report.celebrate = true,
                SessionEvent::GameOver { final_score } => self.record_score(final_score),
                _ => {}
            }
        }

        self.celebrating = report.celebrate;
        report
    }

    pub fn finish_celebration(&mut self) {
        self.celebrating = false;
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.last_rank = None;
        self.celebrating = false;
        self.view = View::Playing;
        self.world.resource_mut::<GameSession>().reset(now_ms);
    }

    fn record_score(&mut self, score: u32) {
        let mut leaderboard = self.world.resource_mut::<Leaderboard>();
        self.last_rank = leaderboard.add_score(score);
        if let Err(e) = leaderboard.save() {
            error!("Failed to save leaderboard: {e:#}");
        }
    }

    fn clear_leaderboard(&mut self) {
        let mut leaderboard = self.world.resource_mut::<Leaderboard>();
        leaderboard.clear();
        if let Err(e) = leaderboard.save() {
            error!("Failed to save leaderboard: {e:#}");
        }
    }
}
