//! Piece module - a shape placed on the grid
//!
//! A piece is a value: moving or rotating it returns a new piece, which lets
//! the game state validate a candidate before committing it.

use arrayvec::ArrayVec;

use crate::shapes::{color_of, matrix_for, Matrix};
use crate::types::{Color, Orientation, RotateDirection, ShapeKind};

/// Absolute grid coordinate (x = column, y = row, row 0 at the top)
pub type Point = (i16, i16);

/// Cells covered by a piece. Every catalog matrix has exactly four cells.
pub type Footprint = ArrayVec<Point, 4>;

/// A shape with an orientation and an anchor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub orientation: Orientation,
    pub x: i16,
    pub y: i16,
}

impl Piece {
    /// Create a piece in its spawn orientation at the given anchor
    pub fn new(kind: ShapeKind, x: i16, y: i16) -> Self {
        Self {
            kind,
            orientation: Orientation::Deg0,
            x,
            y,
        }
    }

    /// Occupancy matrix for an arbitrary orientation of this piece's shape
    pub fn matrix_for(&self, orientation: Orientation) -> Matrix {
        matrix_for(self.kind, orientation)
    }

    /// Occupancy matrix for the current orientation
    pub fn matrix(&self) -> Matrix {
        self.matrix_for(self.orientation)
    }

    pub fn color(&self) -> Color {
        color_of(self.kind)
    }

    /// The same piece shifted by (dx, dy)
    pub fn moved(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// The same piece turned a quarter in `direction` around its anchor
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        Self {
            orientation: self.orientation.rotate(direction),
            ..*self
        }
    }

    /// The same piece moved to a new anchor, orientation unchanged
    pub fn at(&self, x: i16, y: i16) -> Self {
        Self { x, y, ..*self }
    }

    /// Absolute cells covered by this piece.
    ///
    /// Matrix column `c` maps to `x - width / 2 + c`, matrix row `r` to `y + r`.
    pub fn footprint(&self) -> Footprint {
        let matrix = self.matrix();
        let left = self.x - (matrix.width() / 2) as i16;
        matrix
            .filled()
            .map(|(c, r)| (left + c as i16, self.y + r as i16))
            .collect()
    }
}
