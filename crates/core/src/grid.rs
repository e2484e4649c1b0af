//! Grid module - the playfield of locked cells
//!
//! The grid is a width x height matrix where each cell is empty or holds the
//! color of a locked piece. It is sized once per session and never resized.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: (x, y) where x is the column (left to right) and y the row
//! (top to bottom).
//!
//! The active piece is never written here; only `lock_cells` adds cells.

use log::debug;

use crate::piece::Point;
use crate::types::{Cell, Color};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Whether (x, y) lies inside `[0, width) x [0, height)`
    pub fn contains(&self, x: i16, y: i16) -> bool {
        x >= 0 && y >= 0 && (x as u16) < self.width && (y as u16) < self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Cells of row `y`, or an empty slice past the bottom
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: u16) -> bool {
        y < self.height && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Discard row `y` and shift the rows above it down by one.
    ///
    /// The top `frozen_top_rows` rows are never written: with a value of 0 the
    /// vacated top row becomes empty, with N > 0 row N-1 keeps its content and
    /// is also copied into row N. Returns false when `y` lies inside the
    /// frozen band (nothing moves).
    pub fn collapse_row(&mut self, y: u16, frozen_top_rows: u16) -> bool {
        if y >= self.height || y < frozen_top_rows {
            return false;
        }

        let width = self.width as usize;
        let floor = frozen_top_rows.max(1);
        for row in (floor..=y).rev() {
            let src_start = (row as usize - 1) * width;
            let dst_start = row as usize * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        if frozen_top_rows == 0 {
            for cell in &mut self.cells[..width] {
                *cell = None;
            }
        }

        true
    }

    /// Clear every full row, scanning top to bottom.
    ///
    /// Returns the indices of the rows that were collapsed, in scan order.
    /// Full rows inside the frozen band are left alone.
    pub fn clear_full_rows(&mut self, frozen_top_rows: u16) -> Vec<u16> {
        let mut cleared = Vec::new();
        for y in 0..self.height {
            if self.is_row_full(y) && self.collapse_row(y, frozen_top_rows) {
                cleared.push(y);
            }
        }
        if !cleared.is_empty() {
            debug!("cleared rows {:?}", cleared);
        }
        cleared
    }

    /// Write a footprint into the grid with the given color.
    ///
    /// Returns false, leaving the grid untouched, if any cell is out of bounds
    /// or already occupied.
    pub fn lock_cells(&mut self, footprint: &[Point], color: Color) -> bool {
        if !footprint.iter().all(|&(x, y)| self.is_free(x, y)) {
            return false;
        }
        for &(x, y) in footprint {
            self.set(x, y, Some(color));
        }
        true
    }

    /// Get a reference to the internal cells (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
