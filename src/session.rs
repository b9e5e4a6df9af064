#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use log::{debug, info};

use crate::components::{Position, ShapeKind};
use crate::config::{Config, Difficulty};
use crate::factory::PieceFactory;
use crate::game::{MILESTONE_SCORE_STEP, SPAWN_POSITION, points_for_lines};
use crate::grid::Grid;
use crate::input::InputEvent;
use crate::piece::Piece;
use crate::skill::{Activation, ActiveSkill, SkillEngine, SkillKind};

/// Notable things that happened during a frame, for hosts to react to
/// (sounds, celebration pauses, leaderboard writes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Spawned(ShapeKind),
    Locked { cells: usize },
    LinesCleared { count: usize, points: u32 },
    SkillActivated(SkillKind),
    SkillFizzled(SkillKind),
    SkillExpired(SkillKind),
    Milestone { score: u32 },
    GameOver { final_score: u32 },
}

/// One game from first spawn to game over.
///
/// The session is the only owner of the grid; pieces and the skill engine borrow it for
/// the duration of a single call.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    current: Option<Piece>,
    next: Piece,
    factory: PieceFactory,
    skill: SkillEngine,
    rng: fastrand::Rng,
    score: u32,
    milestones_reached: u32,
    game_over: bool,
    final_score: Option<u32>,
}

impl GameSession {
    /// Creates a session and spawns its first piece. The seed drives every random draw.
    #[must_use]
    pub fn new(config: &Config, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let factory = PieceFactory::new(config.difficulty);
        let next = factory.generate(&mut rng);

        let mut session = Self {
            grid: Grid::default(),
            current: None,
            next,
            factory,
            skill: SkillEngine::new(),
            rng,
            score: 0,
            milestones_reached: 0,
            game_over: false,
            final_score: None,
        };
        session.spawn_next(0, &mut Vec::new());
        session
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn energy(&self) -> u32 {
        self.skill.energy()
    }

    #[must_use]
    pub fn active_skill(&self) -> Option<ActiveSkill> {
        self.skill.active()
    }

    #[must_use]
    pub fn skill(&self) -> &SkillEngine {
        &self.skill
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.factory.difficulty()
    }

    /// Takes effect from the next generated piece onwards.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.factory.set_difficulty(difficulty);
    }

    /// Runs one frame: skill activations first, then movement inputs in order, then gravity,
    /// skill expiry and locking.
    pub fn frame(&mut self, now_ms: u64, inputs: &[InputEvent]) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.game_over {
            return events;
        }

        for _ in inputs.iter().filter(|&&input| input == InputEvent::ActivateSkill) {
            self.activate_skill(now_ms, &mut events);
        }

        for &input in inputs.iter().filter(|&&input| input != InputEvent::ActivateSkill) {
            self.apply_movement(input);
        }

        self.advance(now_ms, &mut events);
        events
    }

    /// Applies a single input outside the frame loop.
    pub fn handle_input(&mut self, input: InputEvent, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.game_over {
            return events;
        }

        match input {
            InputEvent::ActivateSkill => self.activate_skill(now_ms, &mut events),
            movement => self.apply_movement(movement),
        }
        events
    }

    /// Advances gravity, skill expiry and locking without any input.
    pub fn update(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if !self.game_over {
            self.advance(now_ms, &mut events);
        }
        events
    }

    /// Returns every piece of state to its initial value in place and spawns a fresh piece.
    pub fn reset(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        info!("Resetting session (score was {})", self.score);

        self.grid.clear();
        self.skill.reset();
        self.score = 0;
        self.milestones_reached = 0;
        self.game_over = false;
        self.final_score = None;
        self.current = None;
        self.next = self.factory.generate(&mut self.rng);

        let mut events = Vec::new();
        self.spawn_next(now_ms, &mut events);
        events
    }

    fn activate_skill(&mut self, now_ms: u64, events: &mut Vec<SessionEvent>) {
        match self.skill.try_activate(&mut self.grid, &mut self.rng, now_ms) {
            Some(Activation::Applied(kind)) => events.push(SessionEvent::SkillActivated(kind)),
            Some(Activation::Fizzled(kind)) => events.push(SessionEvent::SkillFizzled(kind)),
            None => debug!(
                "Skill not ready (energy {}, active {:?})",
                self.skill.energy(),
                self.skill.active_kind()
            ),
        }
    }

    fn apply_movement(&mut self, input: InputEvent) {
        let Some(piece) = self.current.as_mut() else {
            return;
        };

        match input {
            InputEvent::MoveLeft => {
                piece.move_left(&self.grid);
            }
            InputEvent::MoveRight => {
                piece.move_right(&self.grid);
            }
            InputEvent::RotateCw => {
                piece.rotate_clockwise(&self.grid);
            }
            InputEvent::SoftDrop => {
                piece.move_down(&self.grid);
            }
            InputEvent::HardDrop => {
                let distance = piece.hard_drop(&self.grid);
                debug!("Hard drop travelled {distance} rows");
            }
            InputEvent::ActivateSkill => {}
        }
    }

    fn advance(&mut self, now_ms: u64, events: &mut Vec<SessionEvent>) {
        let speed_modifier = self.skill.speed_modifier();
        let locked = match self.current.as_mut() {
            Some(piece) => {
                piece.tick(&self.grid, now_ms, speed_modifier);
                piece.is_locked()
            }
            None => false,
        };

        if let Some(kind) = self.skill.update(now_ms) {
            events.push(SessionEvent::SkillExpired(kind));
        }

        if locked {
            self.lock_current(now_ms, events);
        }
    }

    fn lock_current(&mut self, now_ms: u64, events: &mut Vec<SessionEvent>) {
        let Some(piece) = self.current.take() else {
            return;
        };

        let committed = self.grid.commit(&piece.cells(), piece.kind().color());
        info!(
            "Locked {:?} at ({}, {})",
            piece.kind(),
            piece.position().x,
            piece.position().y
        );
        events.push(SessionEvent::Locked { cells: committed });

        let lines = self.grid.clear_full_lines();
        let points = points_for_lines(lines);
        self.score += points;
        let gained = self.skill.gain_for_lines(lines);
        if lines > 0 {
            info!("Cleared {lines} lines for {points} points and {gained} energy");
            events.push(SessionEvent::LinesCleared {
                count: lines,
                points,
            });
        }

        let milestones = self.score / MILESTONE_SCORE_STEP;
        if milestones > self.milestones_reached {
            self.milestones_reached = milestones;
            info!("Reached score milestone {}", self.score);
            events.push(SessionEvent::Milestone { score: self.score });
        }

        self.spawn_next(now_ms, events);
    }

    fn spawn_next(&mut self, now_ms: u64, events: &mut Vec<SessionEvent>) {
        let upcoming = self.factory.generate(&mut self.rng);
        let mut piece = std::mem::replace(&mut self.next, upcoming);
        piece.set_position(Position::from(SPAWN_POSITION));
        piece.reset_clock(now_ms);

        if !piece.is_valid(&self.grid) {
            info!("Spawn blocked, game over with score {}", self.score);
            self.game_over = true;
            self.final_score = Some(self.score);
            self.current = None;
            events.push(SessionEvent::GameOver {
                final_score: self.score,
            });
            return;
        }

        debug!("Spawned {:?}", piece.kind());
        events.push(SessionEvent::Spawned(piece.kind()));
        self.current = Some(piece);
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn skill_mut(&mut self) -> &mut SkillEngine {
        &mut self.skill
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = Some(piece);
    }
}
