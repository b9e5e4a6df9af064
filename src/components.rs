#![warn(clippy::all, clippy::pedantic)]

/// One rotation state: offsets of the four occupied cells relative to the piece anchor.
pub type Layout = [(i32, i32); 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrickColor {
    Red,
    Green,
    Blue,
    Gray,
    Yellow,
    Magenta,
    Cyan,
}

impl BrickColor {
    #[must_use]
    pub fn to_color(self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            BrickColor::Red => Color::Rgb(255, 50, 50),
            BrickColor::Green => Color::Rgb(50, 255, 50),
            BrickColor::Blue => Color::Rgb(50, 50, 255),
            BrickColor::Gray => Color::Rgb(200, 200, 200),
            BrickColor::Yellow => Color::Rgb(255, 255, 0),
            BrickColor::Magenta => Color::Rgb(255, 0, 255),
            BrickColor::Cyan => Color::Rgb(0, 255, 255),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

const I_LAYOUTS: &[Layout] = &[
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
];

const O_LAYOUTS: &[Layout] = &[[(1, 0), (2, 0), (1, 1), (2, 1)]];

const T_LAYOUTS: &[Layout] = &[
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 1), (1, 0), (1, 1), (1, 2)],
    [(1, 2), (0, 1), (1, 1), (2, 1)],
    [(2, 1), (1, 0), (1, 1), (1, 2)],
];

const S_LAYOUTS: &[Layout] = &[
    [(0, 1), (1, 1), (1, 0), (2, 0)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_LAYOUTS: &[Layout] = &[
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (0, 1), (0, 2)],
];

const J_LAYOUTS: &[Layout] = &[
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 2), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(2, 0), (2, 1), (1, 1), (0, 1)],
];

const L_LAYOUTS: &[Layout] = &[
    [(2, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (1, 1), (1, 0)],
    [(2, 2), (2, 1), (1, 1), (0, 1)],
];

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Every rotation state of the shape, in clockwise order.
    #[must_use]
    pub fn layouts(self) -> &'static [Layout] {
        match self {
            ShapeKind::I => I_LAYOUTS,
            ShapeKind::O => O_LAYOUTS,
            ShapeKind::T => T_LAYOUTS,
            ShapeKind::S => S_LAYOUTS,
            ShapeKind::Z => Z_LAYOUTS,
            ShapeKind::J => J_LAYOUTS,
            ShapeKind::L => L_LAYOUTS,
        }
    }

    #[must_use]
    pub fn rotation_count(self) -> usize {
        self.layouts().len()
    }

    #[must_use]
    pub fn color(self) -> BrickColor {
        match self {
            ShapeKind::I => BrickColor::Red,
            ShapeKind::O => BrickColor::Green,
            ShapeKind::T => BrickColor::Blue,
            ShapeKind::S => BrickColor::Gray,
            ShapeKind::Z => BrickColor::Yellow,
            ShapeKind::J => BrickColor::Magenta,
            ShapeKind::L => BrickColor::Cyan,
        }
    }
}

/// A committed cell of the field together with the color of the piece it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettledBrick {
    pub position: Position,
    pub color: BrickColor,
}
