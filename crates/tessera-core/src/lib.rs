//! Core types and traits for the Tessera tile-merge engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: board geometry
//! constants, directions and cell coordinates, session state and events,
//! the persisted session snapshot, error types, and the narrow traits
//! through which the engine's host talks to its collaborators.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod event;
pub mod id;
pub mod snapshot;
pub mod traits;

pub use direction::Direction;
pub use error::LoadError;
pub use event::{AudioChannel, Cue, SessionEvent, SessionState};
pub use id::{Cell, TickId};
pub use snapshot::{Bests, SessionSnapshot};
pub use traits::{AudioSink, LeaderboardSink, NullSink, SaveSink};

/// Number of rows on the board.
pub const ROWS: usize = 4;

/// Number of columns on the board.
pub const COLS: usize = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = ROWS * COLS;
