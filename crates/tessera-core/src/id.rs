//! Strongly-typed identifiers and the [`Cell`] coordinate.

use smallvec::SmallVec;
use std::fmt;

use crate::direction::Direction;
use crate::{CELL_COUNT, COLS, ROWS};

/// Monotonically increasing tick counter.
///
/// Incremented once per `update()` of the board engine. Reset to zero
/// when a new game starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A logical board position, always within `[0, ROWS) x [0, COLS)`.
///
/// Cells order row-major, which is also the order of persisted cell
/// value arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Create a cell, or `None` if `(row, col)` is off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Create a cell from its row-major index, or `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Self::new(index / COLS, index % COLS)
        } else {
            None
        }
    }

    /// Row of this cell.
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Column of this cell.
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index in `0..CELL_COUNT`.
    pub fn index(self) -> usize {
        self.row() * COLS + self.col()
    }

    /// The adjacent cell one step in `dir`, or `None` past the board edge.
    ///
    /// The edge test depends only on the axis the direction moves along:
    /// `col < 0` for left, `col > COLS - 1` for right, `row < 0` for up,
    /// `row > ROWS - 1` for down.
    pub fn neighbour(self, dir: Direction) -> Option<Cell> {
        let (dr, dc) = dir.offset();
        let row = self.row().checked_add_signed(dr as isize)?;
        let col = self.col().checked_add_signed(dc as isize)?;
        Cell::new(row, col)
    }

    /// All in-bounds 4-connected neighbours.
    ///
    /// Corners have 2, edges have 3, interior cells have 4.
    pub fn neighbours(self) -> SmallVec<[Cell; 4]> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.neighbour(dir))
            .collect()
    }

    /// Iterate every cell on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT).filter_map(Cell::from_index)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
