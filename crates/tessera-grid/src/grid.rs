//! The board: a fixed array of optional tiles plus terminal flags.

use std::fmt;

use rand::Rng;
use smallvec::SmallVec;
use tessera_core::snapshot::is_tile_value;
use tessera_core::{Cell, LoadError, CELL_COUNT, COLS, ROWS};

use crate::layout::Layout;
use crate::tile::Tile;

/// Tiles placed on a fresh board.
pub const STARTING_TILES: usize = 2;

/// Out of ten spawns, how many get the lower tier.
const LOWER_TIER_WEIGHT: u32 = 9;

/// Value rules of one game: spawn tiers and the win threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRules {
    /// Lower spawn tier. The higher tier is twice this. Default: 32.
    pub spawn_base: u32,
    /// Any tile at or above this value wins the game. Default: 2048.
    pub win_threshold: u32,
}

impl Default for GridRules {
    fn default() -> Self {
        Self {
            spawn_base: 32,
            win_threshold: 2048,
        }
    }
}

impl GridRules {
    /// Higher spawn tier.
    pub fn high_tier(&self) -> u32 {
        self.spawn_base * 2
    }
}

/// Logical board state for one play session.
///
/// Every tile is owned by exactly one cell, and the tile's own `cell`
/// always names that cell. `dead` and `won` are sticky: once set they
/// stay set until the grid is replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: [[Option<Tile>; COLS]; ROWS],
    rules: GridRules,
    layout: Layout,
    dead: bool,
    won: bool,
}

impl Grid {
    /// An empty board.
    pub fn new(rules: GridRules, layout: Layout) -> Self {
        Self {
            cells: Default::default(),
            rules,
            layout,
            dead: false,
            won: false,
        }
    }

    /// A fresh game: an empty board with [`STARTING_TILES`] random tiles.
    pub fn start<R: Rng + ?Sized>(rules: GridRules, layout: Layout, rng: &mut R) -> Self {
        let mut grid = Self::new(rules, layout);
        for _ in 0..STARTING_TILES {
            grid.spawn_random(rng);
        }
        grid
    }

    /// Rebuild a board from persisted row-major values (`0` = empty).
    ///
    /// The whole array is checked before any tile is placed, so a bad
    /// value never yields a partially loaded board. Dead and won are
    /// evaluated once on the result.
    pub fn from_values(
        values: &[u32],
        rules: GridRules,
        layout: Layout,
    ) -> Result<Self, LoadError> {
        if values.len() != CELL_COUNT {
            return Err(LoadError::WrongLength {
                expected: CELL_COUNT,
                found: values.len(),
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != 0 && !is_tile_value(v, rules.spawn_base))
        {
            return Err(LoadError::InvalidTileValue { index, value });
        }

        let mut grid = Self::new(rules, layout);
        for (cell, &value) in Cell::all().zip(values) {
            if value != 0 {
                grid.place(cell, value);
            }
        }
        grid.dead = grid.check_dead();
        grid.won = grid.check_won();
        Ok(grid)
    }

    /// Value rules this grid was built with.
    pub fn rules(&self) -> GridRules {
        self.rules
    }

    /// Pixel geometry used for reconciliation.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The tile at `cell`, if any.
    pub fn tile(&self, cell: Cell) -> Option<&Tile> {
        self.cells[cell.row()][cell.col()].as_ref()
    }

    pub(crate) fn slot_mut(&mut self, cell: Cell) -> &mut Option<Tile> {
        &mut self.cells[cell.row()][cell.col()]
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten().flatten()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten().flatten()
    }

    /// Row-major cell values with `0` for empty cells.
    pub fn values(&self) -> [u32; CELL_COUNT] {
        let mut out = [0; CELL_COUNT];
        for tile in self.tiles() {
            out[tile.cell().index()] = tile.value();
        }
        out
    }

    /// Highest tile value on the board, never below 2.
    pub fn highest_tile(&self) -> u32 {
        self.tiles().map(Tile::value).fold(2, u32::max)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.tiles().map(|t| u64::from(t.value())).sum()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> SmallVec<[Cell; CELL_COUNT]> {
        Cell::all().filter(|&c| self.tile(c).is_none()).collect()
    }

    /// Whether every cell holds a tile.
    pub fn is_full(&self) -> bool {
        self.tiles().count() == CELL_COUNT
    }

    pub(crate) fn place(&mut self, cell: Cell, value: u32) {
        *self.slot_mut(cell) = Some(Tile::spawned(value, cell, &self.layout));
    }

    /// Spawn one tile on a uniformly chosen empty cell.
    ///
    /// Cells are drawn uniformly from the whole board and redrawn until an
    /// empty one comes up. The value is the lower tier nine times in ten
    /// and the higher tier otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the board is full. Callers only spawn after a move that
    /// vacated at least one cell, or on an empty board.
    pub fn spawn_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Cell {
        assert!(!self.is_full(), "spawn requested on a full board");
        let cell = loop {
            let candidate = Cell::from_index(rng.random_range(0..CELL_COUNT));
            if let Some(cell) = candidate.filter(|&c| self.tile(c).is_none()) {
                break cell;
            }
        };
        let value = if rng.random_range(0..10) < LOWER_TIER_WEIGHT {
            self.rules.spawn_base
        } else {
            self.rules.high_tier()
        };
        self.place(cell, value);
        cell
    }

    /// Full board with no tile next to an empty cell or an equal tile.
    pub fn check_dead(&self) -> bool {
        Cell::all().all(|cell| match self.tile(cell) {
            None => false,
            Some(tile) => cell.neighbours().iter().all(|&n| {
                self.tile(n)
                    .is_some_and(|other| other.value() != tile.value())
            }),
        })
    }

    /// Some tile is at or above the win threshold.
    pub fn check_won(&self) -> bool {
        self.tiles().any(|t| t.value() >= self.rules.win_threshold)
    }

    /// Latch `won` if the threshold has been reached. Never clears it.
    pub fn refresh_won(&mut self) -> bool {
        if !self.won && self.check_won() {
            self.won = true;
        }
        self.won
    }

    pub(crate) fn mark_dead(&mut self) {
        self.dead = true;
    }

    /// Sticky dead flag.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Sticky won flag.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Advance every tile's slide and scale animation by one tick.
    ///
    /// Returns how many tiles are still in motion afterward.
    pub fn reconcile_positions(&mut self) -> usize {
        let layout = self.layout;
        self.tiles_mut()
            .map(|t| t.advance(&layout))
            .filter(|&moving| moving)
            .count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (col, slot) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match slot {
                    Some(tile) => write!(f, "{:>5}", tile.value())?,
                    None => write!(f, "{:>5}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
