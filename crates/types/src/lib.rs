//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond small conversions, making
//! them usable in any context (core rules, session worker, terminal adapter).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21, row 0 at the top)
//! - **Spawn position**: (width / 2, 0)
//!
//! Both dimensions are configurable per session; the constants below are the
//! defaults.
//!
//! # Gravity Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_GRAVITY_MS` | 1000 | Divided by the difficulty to get the tick period |
//! | `INITIAL_GRAVITY_DELAY_MS` | 1000 | Delay before the first gravity tick |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Action, Orientation, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let shape = ShapeKind::from_str("t").unwrap();
//! assert_eq!(shape, ShapeKind::T);
//!
//! assert_eq!(Orientation::Deg0.rotate_right(), Orientation::Deg90);
//! assert_eq!(Orientation::Deg0.rotate_left(), Orientation::Deg270);
//!
//! assert_eq!(Action::from_str("MOVE_LEFT"), Some(Action::MoveLeft));
//! assert_eq!(Action::from_str("hardDrop"), Some(Action::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Default board height in cells (22 rows)
pub const BOARD_HEIGHT: u16 = 22;

/// Largest accepted width or height
pub const MAX_BOARD_DIM: u16 = 256;

/// Default number of upcoming pieces kept in the preview queue
pub const DEFAULT_QUEUE_LENGTH: usize = 4;

/// Gravity period at difficulty 1 (ms). The period is `BASE_GRAVITY_MS / difficulty`.
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Highest difficulty that still yields a non-zero gravity period
pub const MAX_DIFFICULTY: u32 = BASE_GRAVITY_MS;

/// Delay before the first gravity tick of a session (ms)
pub const INITIAL_GRAVITY_DELAY_MS: u64 = 1000;

/// Number of top rows the row collapse never writes into by default.
///
/// The collapse loop stops at row 2, leaving rows 0 and 1 untouched. Sessions
/// opt out with `frozen_top_rows = 0`.
pub const LEGACY_FROZEN_TOP_ROWS: u16 = 2;

/// The seven tetromino shapes
///
/// Each shape has a distinct display color:
/// - **I**: Cyan, straight bar
/// - **O**: Orange, 2x2 square
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red (mirror of S)
/// - **J**: Blue
/// - **L**: Yellow (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// All shapes in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
        }
    }
}

/// Orientation of a piece in quarter turns (0 = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    /// Rotate clockwise (+90 degrees)
    pub fn rotate_right(&self) -> Self {
        match self {
            Orientation::Deg0 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg0,
        }
    }

    /// Rotate counter-clockwise (-90 degrees)
    pub fn rotate_left(&self) -> Self {
        match self {
            Orientation::Deg0 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg0,
        }
    }

    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Left => self.rotate_left(),
            RotateDirection::Right => self.rotate_right(),
        }
    }

    /// Angle in degrees (0, 90, 180 or 270)
    pub fn degrees(&self) -> u16 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }

    /// Build from an angle; any multiple of 90 is accepted (modulo 360)
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        match degrees.rem_euclid(360) {
            0 => Some(Orientation::Deg0),
            90 => Some(Orientation::Deg90),
            180 => Some(Orientation::Deg180),
            270 => Some(Orientation::Deg270),
            _ => None,
        }
    }
}

/// Direction of a quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateDirection {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

/// Player actions accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    RotateLeft,
    RotateRight,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Hold,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::RotateLeft,
        Action::RotateRight,
        Action::MoveLeft,
        Action::MoveRight,
        Action::SoftDrop,
        Action::HardDrop,
        Action::Hold,
    ];

    /// Parse action from string.
    ///
    /// Case, `_` and `-` are ignored, so `"MOVE_LEFT"`, `"moveLeft"` and
    /// `"move-left"` all parse to [`Action::MoveLeft`].
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "rotateleft" => Some(Action::RotateLeft),
            "rotateright" => Some(Action::RotateRight),
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "softdrop" => Some(Action::SoftDrop),
            "harddrop" => Some(Action::HardDrop),
            "hold" => Some(Action::Hold),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::RotateLeft => "rotateLeft",
            Action::RotateRight => "rotateRight",
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::SoftDrop => "softDrop",
            Action::HardDrop => "hardDrop",
            Action::Hold => "hold",
        }
    }
}

/// Display color of a shape. Mapping to pixels or terminal colors is up to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Orange,
    Purple,
    Green,
    Red,
    Blue,
    Yellow,
}

/// Cell on the board (None = empty, Some = locked with the piece's color)
pub type Cell = Option<Color>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_full_turn_returns_to_start() {
        let mut o = Orientation::Deg90;
        for _ in 0..4 {
            o = o.rotate_right();
        }
        assert_eq!(o, Orientation::Deg90);

        for _ in 0..4 {
            o = o.rotate_left();
        }
        assert_eq!(o, Orientation::Deg90);
    }

    #[test]
    fn orientation_degrees() {
        assert_eq!(Orientation::from_degrees(-90), Some(Orientation::Deg270));
        assert_eq!(Orientation::from_degrees(450), Some(Orientation::Deg90));
        assert_eq!(Orientation::from_degrees(45), None);
        assert_eq!(Orientation::Deg180.degrees(), 180);
    }

    #[test]
    fn action_parse_accepts_both_spellings() {
        for action in Action::ALL {
            assert_eq!(Action::from_str(action.as_str()), Some(action));
        }
        assert_eq!(Action::from_str("ROTATE_RIGHT"), Some(Action::RotateRight));
        assert_eq!(Action::from_str("soft-drop"), Some(Action::SoftDrop));
        assert_eq!(Action::from_str("pause"), None);
    }

    #[test]
    fn action_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&Action::HardDrop).unwrap();
        assert_eq!(json, "\"HARD_DROP\"");
        let back: Action = serde_json::from_str("\"MOVE_RIGHT\"").unwrap();
        assert_eq!(back, Action::MoveRight);
    }

    #[test]
    fn default_gravity_constants() {
        assert_eq!(BASE_GRAVITY_MS, 1000);
        assert_eq!(INITIAL_GRAVITY_DELAY_MS, 1000);
        assert_eq!(LEGACY_FROZEN_TOP_ROWS, 2);
    }
}
