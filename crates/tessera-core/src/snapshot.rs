//! Data exchanged with the persistence and leaderboard collaborators.

use crate::error::LoadError;
use crate::CELL_COUNT;

/// The persisted form of one play session.
///
/// `cells` is row-major; `0` marks an empty cell. The on-disk encoding
/// is owned by the persistence collaborator, not by this type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    /// Tile value per cell, row-major, `0` = empty.
    pub cells: [u32; CELL_COUNT],
    /// Score at the time of the snapshot.
    pub score: u64,
    /// Elapsed play time at the time of the snapshot.
    pub elapsed_ms: u64,
}

impl SessionSnapshot {
    /// Build a snapshot from an untrusted cell slice.
    ///
    /// Only the length is checked here; tile values are checked by
    /// [`validate`](Self::validate), which needs the spawn base.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::{SessionSnapshot, LoadError};
    ///
    /// let snap = SessionSnapshot::from_cells(&[0; 16], 0, 0).unwrap();
    /// assert!(snap.is_empty());
    ///
    /// let err = SessionSnapshot::from_cells(&[0; 15], 0, 0).unwrap_err();
    /// assert_eq!(err, LoadError::WrongLength { expected: 16, found: 15 });
    /// ```
    pub fn from_cells(cells: &[u32], score: u64, elapsed_ms: u64) -> Result<Self, LoadError> {
        let cells: [u32; CELL_COUNT] =
            cells.try_into().map_err(|_| LoadError::WrongLength {
                expected: CELL_COUNT,
                found: cells.len(),
            })?;
        Ok(Self {
            cells,
            score,
            elapsed_ms,
        })
    }

    /// Check that every non-empty cell holds `spawn_base * 2^k`.
    ///
    /// `spawn_base` must itself be a power of two, so a valid value is a
    /// power of two no smaller than the base.
    pub fn validate(&self, spawn_base: u32) -> Result<(), LoadError> {
        for (index, &value) in self.cells.iter().enumerate() {
            if value != 0 && !is_tile_value(value, spawn_base) {
                return Err(LoadError::InvalidTileValue { index, value });
            }
        }
        Ok(())
    }

    /// Whether every cell is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }
}

/// Whether `value` is reachable from `spawn_base` by doubling.
pub fn is_tile_value(value: u32, spawn_base: u32) -> bool {
    value >= spawn_base && value.is_power_of_two()
}

/// Best-known results read back from the leaderboard at session start.
///
/// Used for display comparison only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bests {
    /// Highest final score recorded so far.
    pub best_score: u64,
    /// Fastest win recorded so far, if any game has been won.
    pub fastest_time_ms: Option<u64>,
}
