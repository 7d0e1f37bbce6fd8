//! Directional move/merge scan.

use rand::Rng;
use smallvec::SmallVec;
use tessera_core::{Cell, Direction, CELL_COUNT, COLS, ROWS};

use crate::grid::Grid;

/// Result of one directional command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether any tile changed cell or value.
    pub moved: bool,
    /// New value of each merged tile, in scan order.
    pub merges: SmallVec<[u32; 8]>,
    /// Cell of the tile spawned after the move, if one was.
    pub spawned: Option<Cell>,
}

impl MoveOutcome {
    /// Score credited for this move: the sum of merged values.
    pub fn score_gained(&self) -> u64 {
        self.merges.iter().map(|&v| u64::from(v)).sum()
    }
}

/// Cells in the order a move in `dir` processes them.
///
/// Tiles nearest the target edge come first, so they claim their
/// destinations before the tiles behind them start sliding.
pub fn scan_order(dir: Direction) -> impl Iterator<Item = Cell> {
    (0..CELL_COUNT).filter_map(move |i| {
        let (row, col) = (i / COLS, i % COLS);
        match dir {
            Direction::Left | Direction::Up => Cell::new(row, col),
            Direction::Right => Cell::new(row, COLS - 1 - col),
            Direction::Down => Cell::new(ROWS - 1 - row, col),
        }
    })
}

enum Step {
    Slide,
    Merge,
    Blocked,
}

impl Grid {
    /// Slide and merge every tile toward `dir` without spawning.
    ///
    /// A destination that has already absorbed a tile this move refuses a
    /// second merge. All merge locks are released once the scan ends.
    pub fn shift(&mut self, dir: Direction) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        for cell in scan_order(dir) {
            self.slide_tile(cell, dir, &mut outcome);
        }
        for tile in self.tiles_mut() {
            tile.release();
        }
        outcome
    }

    /// Apply one directional command.
    ///
    /// If anything moved, one random tile is spawned and dead is
    /// re-evaluated. A move that changes nothing leaves the grid untouched
    /// and draws nothing from `rng`.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, dir: Direction, rng: &mut R) -> MoveOutcome {
        let mut outcome = self.shift(dir);
        if outcome.moved {
            outcome.spawned = Some(self.spawn_random(rng));
            if self.check_dead() {
                self.mark_dead();
            }
        }
        outcome
    }

    fn slide_tile(&mut self, from: Cell, dir: Direction, outcome: &mut MoveOutcome) {
        let mut current = from;
        while let Some(next) = current.neighbour(dir) {
            let Some(value) = self.tile(current).map(|t| t.value()) else {
                return;
            };
            let step = match self.tile(next) {
                None => Step::Slide,
                Some(dest) if dest.value() == value && dest.can_combine() => Step::Merge,
                Some(_) => Step::Blocked,
            };
            match step {
                Step::Slide => {
                    let mut tile = self.slot_mut(current).take();
                    if let Some(tile) = tile.as_mut() {
                        tile.relocate(next);
                    }
                    *self.slot_mut(next) = tile;
                    outcome.moved = true;
                    current = next;
                }
                Step::Merge => {
                    *self.slot_mut(current) = None;
                    if let Some(dest) = self.slot_mut(next).as_mut() {
                        outcome.merges.push(dest.absorb());
                    }
                    outcome.moved = true;
                    return;
                }
                Step::Blocked => return,
            }
        }
    }
}
