//! Tile grid and move/merge algorithm for Tessera.
//!
//! A [`Grid`] owns a fixed 4x4 array of optional [`Tile`]s and is the
//! single source of truth for logical board state. It implements:
//!
//! - the directional move/merge scan ([`Grid::shift`], [`Grid::apply_move`])
//! - the two-tier random spawn policy ([`Grid::spawn_random`])
//! - dead and won detection ([`Grid::check_dead`], [`Grid::check_won`])
//! - per-tick slide reconciliation of each tile's visual position
//!   ([`Grid::reconcile_positions`], driven by [`Layout`])
//!
//! # Merge-once-per-move
//!
//! Every tile carries a `can_combine` flag. A merge clears the flag on
//! the destination, so a tile produced by a merge cannot absorb a second
//! tile in the same move. Flags are restored once the scan completes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;
pub mod layout;
pub mod shift;
pub mod tile;

pub use grid::{Grid, GridRules, STARTING_TILES};
pub use layout::{Layout, LayoutError, Point};
pub use shift::{scan_order, MoveOutcome};
pub use tile::{Tile, TileAnimation};
