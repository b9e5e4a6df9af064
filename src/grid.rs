#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Field dimensions are tiny, so row indices always fit in i32
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use log::{debug, warn};

use crate::components::{BrickColor, Position, SettledBrick};

/// The playing field: a fixed-size occupancy matrix plus the colored bricks that fill it.
///
/// Occupancy and bricks are kept in lockstep: every occupied cell has exactly one
/// [`SettledBrick`] and every brick sits on an occupied cell. All mutation goes through
/// methods on this type so that the two views can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    // rows[y][x], row 0 is the top of the field
    rows: Vec<Vec<bool>>,
    bricks: Vec<SettledBrick>,
}

impl Grid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![false; width]; height],
            bricks: Vec::new(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, position: Position) -> Option<(usize, usize)> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Whether the cell is occupied. Out-of-bounds cells report `false`.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.index(position).is_some_and(|(x, y)| self.rows[y][x])
    }

    /// Checks every offset of `layout` shifted by `anchor` against the bounds and
    /// the occupied cells.
    #[must_use]
    pub fn is_valid_position(&self, layout: &[(i32, i32)], anchor: Position) -> bool {
        layout.iter().all(|&(dx, dy)| {
            self.index(anchor.offset(dx, dy))
                .is_some_and(|(x, y)| !self.rows[y][x])
        })
    }

    /// Marks each cell occupied and records a brick for it. Returns the number of cells committed.
    pub fn commit(&mut self, cells: &[Position], color: BrickColor) -> usize {
        let mut committed = 0;

        for &cell in cells {
            let Some((x, y)) = self.index(cell) else {
                warn!("Refusing to commit out-of-bounds cell ({}, {})", cell.x, cell.y);
                continue;
            };

            if self.rows[y][x] {
                warn!("Refusing to commit already occupied cell ({x}, {y})");
                continue;
            }

            self.rows[y][x] = true;
            self.bricks.push(SettledBrick {
                position: cell,
                color,
            });
            committed += 1;
        }

        committed
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows.get(y).is_some_and(|row| row.iter().all(|&cell| cell))
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. When a row is removed the rows above it shift
    /// down into its index, so the same index is scanned again before moving up.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;

        while y > 0 {
            let row = y - 1;
            if !self.is_row_full(row) {
                y -= 1;
                continue;
            }

            self.rows.remove(row);
            self.rows.insert(0, vec![false; self.width]);

            let removed_row = row as i32;
            self.bricks.retain(|brick| brick.position.y != removed_row);
            for brick in &mut self.bricks {
                if brick.position.y < removed_row {
                    brick.position.y += 1;
                }
            }

            debug!("Cleared row {row}");
            cleared += 1;
        }

        cleared
    }

    /// Empties a single cell. Returns `true` if it was occupied.
    pub fn clear_cell(&mut self, position: Position) -> bool {
        let Some((x, y)) = self.index(position) else {
            return false;
        };

        if !self.rows[y][x] {
            return false;
        }

        self.rows[y][x] = false;
        self.bricks.retain(|brick| brick.position != position);
        true
    }

    /// Empties an entire row in place, without shifting anything. Returns the number of
    /// cells that were occupied.
    pub fn clear_row(&mut self, y: usize) -> usize {
        let Some(row) = self.rows.get_mut(y) else {
            return 0;
        };

        let occupied = row.iter().filter(|&&cell| cell).count();
        row.fill(false);

        let y = y as i32;
        self.bricks.retain(|brick| brick.position.y != y);
        occupied
    }

    /// Moves an occupied cell (and its brick) to an empty cell.
    pub fn move_cell(&mut self, from: Position, to: Position) -> bool {
        let (Some((fx, fy)), Some((tx, ty))) = (self.index(from), self.index(to)) else {
            return false;
        };

        if !self.rows[fy][fx] || self.rows[ty][tx] {
            return false;
        }

        self.rows[fy][fx] = false;
        self.rows[ty][tx] = true;
        if let Some(brick) = self.bricks.iter_mut().find(|b| b.position == from) {
            brick.position = to;
        }
        true
    }

    #[must_use]
    pub fn bricks(&self) -> &[SettledBrick] {
        &self.bricks
    }

    #[must_use]
    pub fn brick_at(&self, position: Position) -> Option<&SettledBrick> {
        self.bricks.iter().find(|brick| brick.position == position)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&cell| cell).count()
    }

    /// Row-major view of the occupancy matrix, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(false);
        }
        self.bricks.clear();
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(crate::game::FIELD_WIDTH, crate::game::FIELD_HEIGHT)
    }
}
