//! Persistence collaborator for Tessera.
//!
//! Stores the in-progress session and the leaderboard as two small
//! binary files. The board engine never touches this crate directly:
//! a host injects a [`FileStore`] as the engine's save and leaderboard
//! sink and hands its loaded contents to the engine at session start.
//!
//! # Format
//!
//! ```text
//! [MAGIC "TSRA"] [VERSION u8] [KIND u8] [payload] [FNV-1a checksum u64]
//! ```
//!
//! All integers are little-endian. A session payload is the cell count
//! (`u32`), one `u32` per cell, then score and elapsed time as `u64`.
//! A leaderboard payload is three count-prefixed lists: best tiles
//! (`u32`), best scores (`u64`), fastest times (`u64`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hash;
pub mod leaderboard;
pub mod store;

pub use error::SaveError;
pub use leaderboard::{Leaderboard, LEADERBOARD_SIZE};
pub use store::FileStore;

/// Magic bytes at the start of every save file.
pub const MAGIC: [u8; 4] = *b"TSRA";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;

/// Record kind tag for a saved session.
pub const KIND_SESSION: u8 = 1;

/// Record kind tag for the leaderboard.
pub const KIND_LEADERBOARD: u8 = 2;
