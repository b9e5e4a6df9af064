#![warn(clippy::all, clippy::pedantic)]

// Field dimensions
pub const FIELD_WIDTH: usize = 10;
pub const FIELD_HEIGHT: usize = 16;

// Anchor every freshly spawned piece starts from
pub const SPAWN_POSITION: (i32, i32) = (4, 0);

// Fall intervals per difficulty, in milliseconds
pub const EASY_MOVE_INTERVAL_MS: u64 = 800;
pub const NORMAL_MOVE_INTERVAL_MS: u64 = 500;
pub const HARD_MOVE_INTERVAL_MS: u64 = 300;

// Line clear scoring, indexed by lines cleared in a single lock
pub const POINTS_SINGLE: u32 = 100;
pub const POINTS_DOUBLE: u32 = 200;
pub const POINTS_TRIPLE: u32 = 400;
pub const POINTS_QUADRUPLE: u32 = 600;

// Skill energy
pub const SKILL_ENERGY_PER_LINE: u32 = 20;
pub const MAX_ENERGY: u32 = 60;

// Skill timing
pub const SKILL_BASE_DURATION_MS: u64 = 1000;
pub const TIME_SLOW_DURATION_FACTOR: u64 = 20; // TimeSlow lingers 20x longer than other skills
pub const TIME_SLOW_SPEED_FACTOR: u64 = 3; // Fall interval multiplier while TimeSlow is active

// Score milestones trigger a short celebration in the host
pub const MILESTONE_SCORE_STEP: u32 = 500;
pub const MILESTONE_PAUSE_MS: u64 = 1000;

// Leaderboard retention
pub const LEADERBOARD_SIZE: usize = 10;

/// Points awarded for clearing `lines` rows with a single lock.
#[must_use]
pub fn points_for_lines(lines: usize) -> u32 {
    match lines {
        1 => POINTS_SINGLE,
        2 => POINTS_DOUBLE,
        3 => POINTS_TRIPLE,
        4 => POINTS_QUADRUPLE,
        _ => 0,
    }
}
