//! Shape catalog - occupancy matrices and colors for the seven tetrominoes
//!
//! Every orientation of every shape is authored by hand rather than computed
//! by rotating another matrix, so the pivot of each shape is exactly what the
//! table says. Rows are listed top to bottom; `#` marks an occupied cell.
//!
//! A piece maps its matrix onto the grid with column `c` landing at
//! `anchor.x - width / 2 + c` and row `r` at `anchor.y + r`. The O matrix keeps
//! an empty leading column so an O anchored at `x` covers columns `x` and `x + 1`.

use crate::types::{Color, Orientation, ShapeKind};

/// An immutable, rectangular occupancy matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matrix {
    rows: &'static [&'static str],
}

impl Matrix {
    const fn new(rows: &'static [&'static str]) -> Self {
        Self { rows }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether the cell at (col, row) is occupied. Out of range is empty.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.as_bytes().get(col))
            .is_some_and(|&b| b == b'#')
    }

    /// Iterate occupied (col, row) pairs in row-major order
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'#')
                .map(move |(c, _)| (c, r))
        })
    }
}

/// Get the occupancy matrix for a shape in a given orientation
pub fn matrix_for(kind: ShapeKind, orientation: Orientation) -> Matrix {
    let table = match kind {
        ShapeKind::I => &I_MATRICES,
        ShapeKind::O => &O_MATRICES,
        ShapeKind::T => &T_MATRICES,
        ShapeKind::S => &S_MATRICES,
        ShapeKind::Z => &Z_MATRICES,
        ShapeKind::J => &J_MATRICES,
        ShapeKind::L => &L_MATRICES,
    };
    table[orientation_index(orientation)]
}

/// Display color of a shape
pub fn color_of(kind: ShapeKind) -> Color {
    match kind {
        ShapeKind::I => Color::Cyan,
        ShapeKind::O => Color::Orange,
        ShapeKind::T => Color::Purple,
        ShapeKind::S => Color::Green,
        ShapeKind::Z => Color::Red,
        ShapeKind::J => Color::Blue,
        ShapeKind::L => Color::Yellow,
    }
}

fn orientation_index(orientation: Orientation) -> usize {
    match orientation {
        Orientation::Deg0 => 0,
        Orientation::Deg90 => 1,
        Orientation::Deg180 => 2,
        Orientation::Deg270 => 3,
    }
}

/// Matrices indexed by orientation: 0, 90, 180, 270 degrees
type OrientationTable = [Matrix; 4];

const I_MATRICES: OrientationTable = [
    Matrix::new(&["####"]),
    Matrix::new(&["#", "#", "#", "#"]),
    Matrix::new(&["####"]),
    Matrix::new(&["#", "#", "#", "#"]),
];

const O_MATRICES: OrientationTable = [
    Matrix::new(&[".##", ".##"]),
    Matrix::new(&[".##", ".##"]),
    Matrix::new(&[".##", ".##"]),
    Matrix::new(&[".##", ".##"]),
];

const T_MATRICES: OrientationTable = [
    Matrix::new(&["###", ".#."]),
    Matrix::new(&[".#", "##", ".#"]),
    Matrix::new(&[".#.", "###"]),
    Matrix::new(&["#.", "##", "#."]),
];

const S_MATRICES: OrientationTable = [
    Matrix::new(&[".##", "##."]),
    Matrix::new(&["#.", "##", ".#"]),
    Matrix::new(&[".##", "##."]),
    Matrix::new(&["#.", "##", ".#"]),
];

const Z_MATRICES: OrientationTable = [
    Matrix::new(&["##.", ".##"]),
    Matrix::new(&[".#", "##", "#."]),
    Matrix::new(&["##.", ".##"]),
    Matrix::new(&[".#", "##", "#."]),
];

const J_MATRICES: OrientationTable = [
    Matrix::new(&["###", "..#"]),
    Matrix::new(&[".#", ".#", "##"]),
    Matrix::new(&["#..", "###"]),
    Matrix::new(&["##", "#.", "#."]),
];

const L_MATRICES: OrientationTable = [
    Matrix::new(&["###", "#.."]),
    Matrix::new(&["##", ".#", ".#"]),
    Matrix::new(&["..#", "###"]),
    Matrix::new(&["#.", "#.", "##"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    const ORIENTATIONS: [Orientation; 4] = [
        Orientation::Deg0,
        Orientation::Deg90,
        Orientation::Deg180,
        Orientation::Deg270,
    ];

    #[test]
    fn every_matrix_has_four_cells_and_is_rectangular() {
        for kind in ShapeKind::ALL {
            for o in ORIENTATIONS {
                let m = matrix_for(kind, o);
                assert_eq!(m.filled().count(), 4, "{:?} {:?}", kind, o);
                for r in 0..m.height() {
                    assert_eq!(m.rows[r].len(), m.width(), "{:?} {:?} row {}", kind, o, r);
                }
            }
        }
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        for kind in ShapeKind::ALL {
            let m0 = matrix_for(kind, Orientation::Deg0);
            let m90 = matrix_for(kind, Orientation::Deg90);
            if kind == ShapeKind::O {
                assert_eq!(m0, m90);
                continue;
            }
            assert_eq!(m0.width(), m90.height(), "{:?}", kind);
            assert_eq!(m0.height(), m90.width(), "{:?}", kind);
        }
    }

    #[test]
    fn l_matrix_layout() {
        // ###
        // #..
        let m = matrix_for(ShapeKind::L, Orientation::Deg0);
        assert_eq!((m.width(), m.height()), (3, 2));
        assert!(m.is_filled(0, 0) && m.is_filled(1, 0) && m.is_filled(2, 0));
        assert!(m.is_filled(0, 1));
        assert!(!m.is_filled(1, 1) && !m.is_filled(2, 1));

        // ##
        // .#
        // .#
        let m = matrix_for(ShapeKind::L, Orientation::Deg90);
        assert_eq!(m.filled().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn out_of_range_is_empty() {
        let m = matrix_for(ShapeKind::I, Orientation::Deg0);
        assert!(!m.is_filled(4, 0));
        assert!(!m.is_filled(0, 1));
    }

    #[test]
    fn colors_are_distinct() {
        let mut seen = Vec::new();
        for kind in ShapeKind::ALL {
            let c = color_of(kind);
            assert!(!seen.contains(&c), "duplicate color {:?}", c);
            seen.push(c);
        }
    }
}
