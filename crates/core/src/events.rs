//! Change events recorded by the game state for observers
//!
//! Events are buffered during a mutation and drained by the owner afterwards,
//! so observers only ever see completed mutations.

use serde::Serialize;

use crate::piece::Point;
use crate::types::{Orientation, ShapeKind};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// An active piece is in play
    #[default]
    Falling,
    /// A new piece could not be placed; terminal
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Moved { from: Point, to: Point },
    Rotated { orientation: Orientation },
    Locked { kind: ShapeKind, cells: Vec<Point> },
    RowsCleared { rows: Vec<u16> },
    Spawned { kind: ShapeKind },
    HoldSwapped { held: ShapeKind, active: ShapeKind },
    GameOver,
}

impl GameEvent {
    pub fn is_lock(&self) -> bool {
        matches!(self, GameEvent::Locked { .. })
    }
}
