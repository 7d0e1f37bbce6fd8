//! Collaborator traits.
//!
//! The board engine holds no reference to any collaborator. A host
//! owns one implementation of each trait, injected at construction,
//! and forwards the engine's [`SessionEvent`](crate::SessionEvent)s to
//! them. Every method is fire-and-forget: implementations swallow their
//! own failures and the host never retries.

use crate::event::{AudioChannel, Cue};
use crate::snapshot::SessionSnapshot;

/// Receives session snapshots for persistence.
pub trait SaveSink: Send {
    /// Persist `snapshot`, replacing any previous one.
    fn save(&mut self, snapshot: &SessionSnapshot);
}

/// Receives final results for the leaderboard.
pub trait LeaderboardSink: Send {
    /// Record a finished (dead) game.
    fn record_death(&mut self, highest_tile: u32, final_score: u64);

    /// Record a won game.
    fn record_win(&mut self, elapsed_ms: u64);
}

/// Plays sound cues and adjusts channel volume.
pub trait AudioSink: Send {
    /// Play a one-shot cue.
    fn play(&mut self, cue: Cue);

    /// Set a channel's gain in decibels.
    fn set_volume(&mut self, channel: AudioChannel, gain_db: f32);
}

/// A sink that discards everything.
///
/// Useful for headless runs and tests that do not care about
/// notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SaveSink for NullSink {
    fn save(&mut self, _snapshot: &SessionSnapshot) {}
}

impl LeaderboardSink for NullSink {
    fn record_death(&mut self, _highest_tile: u32, _final_score: u64) {}

    fn record_win(&mut self, _elapsed_ms: u64) {}
}

impl AudioSink for NullSink {
    fn play(&mut self, _cue: Cue) {}

    fn set_volume(&mut self, _channel: AudioChannel, _gain_db: f32) {}
}
