//! Tessera: a deterministic sliding-tile merge engine.
//!
//! This is the facade crate that re-exports the public API of the
//! Tessera sub-crates. For most users, adding `tessera` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! let saved = SessionSnapshot::from_cells(
//!     &[32, 32, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
//!     0,
//!     0,
//! )
//! .unwrap();
//! let mut engine = BoardEngine::new(EngineConfig::default(), Some(saved), Bests::default()).unwrap();
//! engine.submit(Direction::Left);
//! let report = engine.update(0);
//!
//! assert_eq!(report.outcome, CommandOutcome::Moved(Direction::Left));
//! assert_eq!(engine.scores().current_score(), 64);
//! assert_eq!(engine.state(), SessionState::Active);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | Directions, cells, events, snapshots, collaborator traits |
//! | [`grid`] | `tessera-grid` | Tiles, the board, move/merge and layout |
//! | [`engine`] | `tessera-engine` | Tick loop, scoring, input, host driver |
//! | [`save`] | `tessera-save` | Binary save files and the leaderboard |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Shared vocabulary (`tessera-core`).
///
/// Board constants, [`types::Direction`], [`types::Cell`], session events
/// and the [`types::SaveSink`], [`types::LeaderboardSink`] and
/// [`types::AudioSink`] traits.
pub use tessera_core as types;

/// The board (`tessera-grid`).
///
/// [`grid::Grid`] owns tiles, spawning, dead and won detection and the
/// per-direction move algorithm.
pub use tessera_grid as grid;

/// Session orchestration (`tessera-engine`).
///
/// [`engine::BoardEngine`] for tick-at-a-time stepping,
/// [`engine::Host`] for fixed-rate driving with collaborators attached.
pub use tessera_engine as engine;

/// Persistence (`tessera-save`).
///
/// [`save::FileStore`] writes checksummed session and leaderboard files.
pub use tessera_save as save;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use tessera_core::{
        AudioChannel, AudioSink, Bests, Cell, Cue, Direction, LeaderboardSink, NullSink,
        SaveSink, SessionEvent, SessionSnapshot, SessionState,
    };

    // Grid
    pub use tessera_grid::{Grid, GridRules, Layout};

    // Engine
    pub use tessera_engine::{
        BoardEngine, Collaborators, CommandOutcome, EngineConfig, Host, MenuButton, StepMetrics,
        TickReport,
    };

    // Persistence
    pub use tessera_save::{FileStore, Leaderboard, SaveError};
}
