//! Collision detection for candidate piece placements
//!
//! A candidate is legal when every footprint cell is inside the grid and each
//! cell is either free or was part of the piece's own footprint just before
//! the move. There is no wall-kick search: a rotation that collides at the
//! current anchor is refused.

use crate::grid::Grid;
use crate::piece::{Piece, Point};
use crate::types::RotateDirection;

/// Whether `candidate` fits on the grid, treating `previous` as its own cells
pub fn fits(grid: &Grid, candidate: &Piece, previous: &[Point]) -> bool {
    candidate.footprint().iter().all(|&(x, y)| {
        grid.contains(x, y) && (!grid.is_occupied(x, y) || previous.contains(&(x, y)))
    })
}

/// Whether `piece` can be shifted by (dx, dy)
pub fn can_move(grid: &Grid, piece: &Piece, dx: i16, dy: i16, previous: &[Point]) -> bool {
    fits(grid, &piece.moved(dx, dy), previous)
}

/// Whether `piece` can turn a quarter in `direction` without moving its anchor
pub fn can_rotate(grid: &Grid, piece: &Piece, direction: RotateDirection, previous: &[Point]) -> bool {
    fits(grid, &piece.rotated(direction), previous)
}

/// Number of rows `piece` can fall before it is blocked
pub fn drop_distance(grid: &Grid, piece: &Piece, previous: &[Point]) -> i16 {
    let mut distance = 0;
    while can_move(grid, piece, 0, distance + 1, previous) {
        distance += 1;
    }
    distance
}
