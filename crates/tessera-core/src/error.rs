//! Error types shared across the Tessera workspace.

use std::error::Error;
use std::fmt;

/// A persisted session could not be turned into a board.
///
/// This is the "corrupted save state" case: the engine never loads a
/// partial board and falls back to a fresh game instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// The cell array does not hold exactly one value per cell.
    WrongLength {
        /// The required number of cells.
        expected: usize,
        /// The number of cells found.
        found: usize,
    },
    /// A cell holds a value that no sequence of spawns and merges can produce.
    InvalidTileValue {
        /// Row-major index of the offending cell.
        index: usize,
        /// The offending value.
        value: u32,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            Self::InvalidTileValue { index, value } => {
                write!(f, "cell {index} holds invalid tile value {value}")
            }
        }
    }
}

impl Error for LoadError {}
