//! Tick orchestration for the Tessera tile-merge engine.
//!
//! [`BoardEngine`] owns one play session: the grid, the score tracker,
//! the seeded spawn source and the `Active`/`Dead`/`Won` state machine.
//! Each [`update()`](BoardEngine::update) consumes at most one pending
//! directional command and returns a [`TickReport`] carrying the events
//! the session raised for its collaborators.
//!
//! [`Host`] drives an engine at a fixed rate through [`FixedStep`],
//! feeds it from an edge-triggered [`InputLatch`], routes the menu
//! [`Shell`], and delivers events to injected save, leaderboard and
//! audio sinks, either inline or through a bounded outbox thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod board;
pub mod clock;
pub mod config;
pub mod host;
pub mod ingress;
pub mod metrics;
pub mod outbox;
pub mod score;
pub mod screen;

pub use board::{BoardEngine, TickReport};
pub use clock::{FixedStep, FrameBudget};
pub use config::{ConfigError, EngineConfig};
pub use host::{Collaborators, FrameReport, Host};
pub use ingress::{Admission, CommandOutcome, CommandSlot, InputLatch};
pub use metrics::{HostMetrics, StepMetrics};
pub use outbox::Outgoing;
pub use score::ScoreTracker;
pub use screen::{MenuButton, Screen, Shell, ShellAction};
