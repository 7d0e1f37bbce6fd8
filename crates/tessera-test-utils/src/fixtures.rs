//! Board fixtures.
//!
//! Boards are written as four rows of values so a test reads like the
//! board it describes. `0` marks an empty cell.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tessera_core::{SessionSnapshot, CELL_COUNT, COLS, ROWS};
use tessera_grid::{Grid, GridRules, Layout};

/// Full board with no equal neighbours.
pub const CHECKERBOARD: [[u32; COLS]; ROWS] = [
    [32, 64, 32, 64],
    [64, 32, 64, 32],
    [32, 64, 32, 64],
    [64, 32, 64, 32],
];

/// Nearly-dead board: sliding left fills the last gap with a tile that
/// matches none of its neighbours, whichever tier spawns.
pub const ONE_MOVE_FROM_DEAD: [[u32; COLS]; ROWS] = [
    [128, 256, 128, 256],
    [256, 128, 256, 128],
    [128, 256, 128, 256],
    [0, 512, 1024, 512],
];

/// Row-major flattening of a row table.
pub fn flatten(rows: [[u32; COLS]; ROWS]) -> [u32; CELL_COUNT] {
    let mut out = [0; CELL_COUNT];
    for (r, row) in rows.iter().enumerate() {
        out[r * COLS..(r + 1) * COLS].copy_from_slice(row);
    }
    out
}

/// Grid with default rules and layout.
///
/// # Panics
///
/// Panics if a value is not a valid tile for the default spawn base.
pub fn grid_from_rows(rows: [[u32; COLS]; ROWS]) -> Grid {
    Grid::from_values(&flatten(rows), GridRules::default(), Layout::default())
        .expect("fixture rows must hold valid tile values")
}

/// Saved session holding `rows`.
pub fn snapshot_from_rows(rows: [[u32; COLS]; ROWS], score: u64, elapsed_ms: u64) -> SessionSnapshot {
    SessionSnapshot {
        cells: flatten(rows),
        score,
        elapsed_ms,
    }
}

/// Deterministic spawn source.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
