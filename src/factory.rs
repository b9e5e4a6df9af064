#![warn(clippy::all, clippy::pedantic)]

use log::debug;

use crate::components::ShapeKind;
use crate::config::Difficulty;
use crate::piece::Piece;

/// Produces new pieces from independent uniform draws.
///
/// There is no bag randomizer or repeat protection: the shape is drawn uniformly from
/// the seven kinds and the starting rotation uniformly from that shape's states.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceFactory {
    difficulty: Difficulty,
}

impl PieceFactory {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn generate(&self, rng: &mut fastrand::Rng) -> Piece {
        let kind = ShapeKind::ALL[rng.usize(..ShapeKind::ALL.len())];
        let rotation = rng.usize(..kind.rotation_count());
        debug!("Generated {kind:?} piece with rotation {rotation}");
        Piece::new(kind, rotation, self.difficulty.move_interval_ms())
    }
}
