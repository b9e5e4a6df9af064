#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Field dimensions are tiny, so grid indices always fit in i32
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use log::{debug, info};

use crate::components::Position;
use crate::game::{
    MAX_ENERGY, SKILL_BASE_DURATION_MS, SKILL_ENERGY_PER_LINE, TIME_SLOW_DURATION_FACTOR,
    TIME_SLOW_SPEED_FACTOR,
};
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillKind {
    Explosion,
    TimeSlow,
    ClearLine,
}

impl SkillKind {
    pub const ALL: [SkillKind; 3] = [
        SkillKind::Explosion,
        SkillKind::TimeSlow,
        SkillKind::ClearLine,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SkillKind::Explosion => "Explosion",
            SkillKind::TimeSlow => "Time Slow",
            SkillKind::ClearLine => "Clear Line",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSkill {
    pub kind: SkillKind,
    pub started_at_ms: u64,
    pub duration_ms: u64,
}

impl ActiveSkill {
    #[must_use]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) > self.duration_ms
    }
}

/// Result of a successful activation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The skill took effect and is now active.
    Applied(SkillKind),
    /// Energy was spent but the field had no bricks to target, so nothing happened.
    Fizzled(SkillKind),
}

/// Energy bookkeeping and the Idle/Active skill state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillEngine {
    energy: u32,
    active: Option<ActiveSkill>,
}

impl SkillEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn energy(&self) -> u32 {
        self.energy
    }

    #[must_use]
    pub fn active(&self) -> Option<ActiveSkill> {
        self.active
    }

    #[must_use]
    pub fn active_kind(&self) -> Option<SkillKind> {
        self.active.map(|skill| skill.kind)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    #[must_use]
    pub fn can_activate(&self) -> bool {
        self.is_idle() && self.energy >= MAX_ENERGY
    }

    /// Credits energy for lines cleared by a natural lock and returns the amount gained.
    pub fn gain_for_lines(&mut self, lines: usize) -> u32 {
        let lines = u32::try_from(lines).unwrap_or(u32::MAX);
        let gained = SKILL_ENERGY_PER_LINE.saturating_mul(lines);
        self.energy = self.energy.saturating_add(gained);
        gained
    }

    /// Fall interval multiplier for the active piece.
    #[must_use]
    pub fn speed_modifier(&self) -> u64 {
        match self.active_kind() {
            Some(SkillKind::TimeSlow) => TIME_SLOW_SPEED_FACTOR,
            _ => 1,
        }
    }

    /// Spends [`MAX_ENERGY`] on a random skill and applies its effect to `grid`.
    ///
    /// Returns `None` without touching anything when a skill is already active or there is
    /// not enough energy. The energy is spent before a target is chosen, so an empty field
    /// yields [`Activation::Fizzled`] and the engine stays idle.
    pub fn try_activate(
        &mut self,
        grid: &mut Grid,
        rng: &mut fastrand::Rng,
        now_ms: u64,
    ) -> Option<Activation> {
        if !self.can_activate() {
            return None;
        }

        self.energy -= MAX_ENERGY;
        let kind = SkillKind::ALL[rng.usize(..SkillKind::ALL.len())];

        let bricks = grid.bricks();
        if bricks.is_empty() {
            info!("{} fizzled: no bricks on the field", kind.name());
            return Some(Activation::Fizzled(kind));
        }
        let target = bricks[rng.usize(..bricks.len())].position;

        let mut duration_ms = SKILL_BASE_DURATION_MS;
        match kind {
            SkillKind::TimeSlow => duration_ms *= TIME_SLOW_DURATION_FACTOR,
            SkillKind::Explosion => {
                let cleared = explode(grid, target);
                let moved = settle(grid);
                debug!(
                    "Explosion at ({}, {}) cleared {cleared} cells, settled {moved}",
                    target.x, target.y
                );
            }
            SkillKind::ClearLine => {
                let cleared = grid.clear_row(target.y as usize);
                let moved = settle(grid);
                debug!(
                    "Clear line on row {} removed {cleared} cells, settled {moved}",
                    target.y
                );
            }
        }

        info!("Activated {} for {duration_ms}ms", kind.name());
        self.active = Some(ActiveSkill {
            kind,
            started_at_ms: now_ms,
            duration_ms,
        });
        Some(Activation::Applied(kind))
    }

    /// Ends the active skill once its duration has passed. Returns the kind that expired.
    pub fn update(&mut self, now_ms: u64) -> Option<SkillKind> {
        let active = self.active?;
        if !active.is_expired(now_ms) {
            return None;
        }

        debug!("{} expired", active.kind.name());
        self.active = None;
        Some(active.kind)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub(crate) fn set_energy(&mut self, energy: u32) {
        self.energy = energy;
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, active: ActiveSkill) {
        self.active = Some(active);
    }
}

/// Clears every occupied cell in the 3x3 block centered on `center`, clipped to the field.
/// Returns the number of cells cleared.
pub fn explode(grid: &mut Grid, center: Position) -> usize {
    let mut cleared = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if grid.clear_cell(center.offset(dx, dy)) {
                cleared += 1;
            }
        }
    }
    cleared
}

/// Gravity compaction after skill removals.
///
/// Walks from the second-to-last row up to the top and drops every occupied cell by the
/// length of the empty run directly beneath it. Lower cells are settled first, so each
/// cell moves at most once. Returns the number of cells moved.
pub fn settle(grid: &mut Grid) -> usize {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut moved = 0;

    for y in (0..height - 1).rev() {
        for x in 0..width {
            let from = Position::new(x, y);
            if !grid.is_occupied(from) {
                continue;
            }

            let mut drop = 0;
            while y + drop + 1 < height && !grid.is_occupied(Position::new(x, y + drop + 1)) {
                drop += 1;
            }

            if drop > 0 && grid.move_cell(from, Position::new(x, y + drop)) {
                moved += 1;
            }
        }
    }

    moved
}
