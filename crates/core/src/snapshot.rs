//! Read-only copies of the game for views and remote observers
//!
//! A snapshot owns its data and serializes to JSON. `GameState::snapshot_into`
//! refills an existing snapshot so a publisher can reuse its buffers.

use serde::Serialize;

use crate::events::Phase;
use crate::piece::{Piece, Point};
use crate::types::{Cell, Color, Orientation, ShapeKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub orientation: Orientation,
    pub x: i16,
    pub y: i16,
    pub color: Color,
    pub footprint: Vec<Point>,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            orientation: value.orientation,
            x: value.x,
            y: value.y,
            color: value.color(),
            footprint: value.footprint().to_vec(),
        }
    }
}

/// Read-only copy of everything a view needs to draw a frame
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Locked cells, row-major
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    /// Footprint of the active piece before the last mutation (cells to erase)
    pub previous_footprint: Vec<Point>,
    /// Anchor row a hard drop would rest at
    pub landing_y: Option<i16>,
    pub next: Vec<ShapeKind>,
    pub held: Option<ShapeKind>,
    pub can_hold: bool,
    pub phase: Phase,
    pub revision: u64,
}

impl GameSnapshot {
    /// Locked cell at (x, y); out of bounds reads as empty
    pub fn cell(&self, x: i16, y: i16) -> Cell {
        if x < 0 || y < 0 || x as u16 >= self.width || y as u16 >= self.height {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Color to draw at (x, y): the active piece wins over the locked grid
    pub fn visible_cell(&self, x: i16, y: i16) -> Cell {
        if let Some(active) = &self.active {
            if active.footprint.contains(&(x, y)) {
                return Some(active.color);
            }
        }
        self.cell(x, y)
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }
}
