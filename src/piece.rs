#![warn(clippy::all, clippy::pedantic)]

use log::trace;

use crate::components::{Layout, Position, ShapeKind};
use crate::game::SPAWN_POSITION;
use crate::grid::Grid;

// Anchor adjustments tried, in order, when a rotation collides
const WALL_KICKS: [(i32, i32); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    Falling,
    Locked,
}

/// The active falling piece.
///
/// Every movement is validated against the grid before the piece changes; an invalid
/// request leaves the piece untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    rotation: usize,
    position: Position,
    state: PieceState,
    move_interval_ms: u64,
    last_move_ms: u64,
}

impl Piece {
    /// Creates a falling piece at the spawn anchor.
    #[must_use]
    pub fn new(kind: ShapeKind, rotation: usize, move_interval_ms: u64) -> Self {
        Self {
            kind,
            rotation: rotation % kind.rotation_count(),
            position: Position::from(SPAWN_POSITION),
            state: PieceState::Falling,
            move_interval_ms,
            last_move_ms: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn state(&self) -> PieceState {
        self.state
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state == PieceState::Locked
    }

    #[must_use]
    pub fn move_interval_ms(&self) -> u64 {
        self.move_interval_ms
    }

    #[must_use]
    pub fn layout(&self) -> &'static Layout {
        &self.kind.layouts()[self.rotation]
    }

    /// Absolute grid cells covered by the piece.
    #[must_use]
    pub fn cells(&self) -> Vec<Position> {
        self.layout()
            .iter()
            .map(|&(dx, dy)| self.position.offset(dx, dy))
            .collect()
    }

    /// Places the piece at `position` without any validation. Used when spawning.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Restarts the gravity clock so the first drop happens one interval after `now_ms`.
    pub fn reset_clock(&mut self, now_ms: u64) {
        self.last_move_ms = now_ms;
    }

    #[must_use]
    pub fn is_valid(&self, grid: &Grid) -> bool {
        grid.is_valid_position(self.layout(), self.position)
    }

    fn try_shift(&mut self, grid: &Grid, dx: i32, dy: i32) -> bool {
        if self.is_locked() {
            return false;
        }

        let target = self.position.offset(dx, dy);
        if grid.is_valid_position(self.layout(), target) {
            self.position = target;
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self, grid: &Grid) -> bool {
        self.try_shift(grid, -1, 0)
    }

    pub fn move_right(&mut self, grid: &Grid) -> bool {
        self.try_shift(grid, 1, 0)
    }

    /// Moves one row down if possible. Never locks the piece.
    pub fn move_down(&mut self, grid: &Grid) -> bool {
        self.try_shift(grid, 0, 1)
    }

    /// Drops the piece as far as it can go and returns the number of rows travelled.
    ///
    /// The piece stays falling; the next gravity tick locks it.
    pub fn hard_drop(&mut self, grid: &Grid) -> u32 {
        let mut distance = 0;
        while self.try_shift(grid, 0, 1) {
            distance += 1;
        }
        distance
    }

    /// Rotates clockwise, trying each wall kick in order. The rotation index, layout
    /// and anchor change together or not at all.
    pub fn rotate_clockwise(&mut self, grid: &Grid) -> bool {
        if self.is_locked() {
            return false;
        }

        let layouts = self.kind.layouts();
        let next_rotation = (self.rotation + 1) % layouts.len();
        let next_layout = &layouts[next_rotation];

        for (dx, dy) in WALL_KICKS {
            let candidate = self.position.offset(dx, dy);
            if grid.is_valid_position(next_layout, candidate) {
                self.rotation = next_rotation;
                self.position = candidate;
                return true;
            }
        }

        false
    }

    /// Advances gravity. Once `move_interval * speed_modifier` has elapsed since the last
    /// drop the piece moves down a row, or locks if it cannot.
    pub fn tick(&mut self, grid: &Grid, now_ms: u64, speed_modifier: u64) -> PieceState {
        if self.is_locked() {
            return self.state;
        }

        let interval = self.move_interval_ms * speed_modifier;
        if now_ms.saturating_sub(self.last_move_ms) < interval {
            return self.state;
        }

        if self.try_shift(grid, 0, 1) {
            trace!("Piece moved down to ({}, {})", self.position.x, self.position.y);
            self.last_move_ms = now_ms;
        } else {
            self.state = PieceState::Locked;
        }

        self.state
    }
}
