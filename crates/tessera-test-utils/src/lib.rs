//! Test utilities and recording collaborators for Tessera development.
//!
//! Provides recording implementations of the collaborator traits
//! ([`SaveSink`], [`LeaderboardSink`], [`AudioSink`]) whose handles can
//! be cloned before the sink is moved into a host, plus board fixtures
//! in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Arc, Mutex};

use tessera_core::{AudioChannel, AudioSink, Cue, LeaderboardSink, SaveSink, SessionSnapshot};

pub use fixtures::{grid_from_rows, seeded_rng, snapshot_from_rows};

/// Records every snapshot it is asked to save.
///
/// Clones share one log, so keep a clone for assertions and move the
/// other into the code under test.
#[derive(Clone, Default)]
pub struct RecordingSaveSink {
    saves: Arc<Mutex<Vec<SessionSnapshot>>>,
}

impl RecordingSaveSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every snapshot saved so far, oldest first.
    pub fn saves(&self) -> Vec<SessionSnapshot> {
        self.saves.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<SessionSnapshot> {
        self.saves.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

impl SaveSink for RecordingSaveSink {
    fn save(&mut self, snapshot: &SessionSnapshot) {
        self.saves.lock().unwrap().push(snapshot.clone());
    }
}

/// Records death and win reports.
#[derive(Clone, Default)]
pub struct RecordingLeaderboard {
    deaths: Arc<Mutex<Vec<(u32, u64)>>>,
    wins: Arc<Mutex<Vec<u64>>>,
}

impl RecordingLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(highest_tile, final_score)` per reported death.
    pub fn deaths(&self) -> Vec<(u32, u64)> {
        self.deaths.lock().unwrap().clone()
    }

    /// Elapsed milliseconds per reported win.
    pub fn wins(&self) -> Vec<u64> {
        self.wins.lock().unwrap().clone()
    }
}

impl LeaderboardSink for RecordingLeaderboard {
    fn record_death(&mut self, highest_tile: u32, final_score: u64) {
        self.deaths.lock().unwrap().push((highest_tile, final_score));
    }

    fn record_win(&mut self, elapsed_ms: u64) {
        self.wins.lock().unwrap().push(elapsed_ms);
    }
}

/// Records cues played and volume changes.
#[derive(Clone, Default)]
pub struct RecordingAudio {
    cues: Arc<Mutex<Vec<Cue>>>,
    volumes: Arc<Mutex<Vec<(AudioChannel, f32)>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.lock().unwrap().clone()
    }

    pub fn volumes(&self) -> Vec<(AudioChannel, f32)> {
        self.volumes.lock().unwrap().clone()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.lock().unwrap().push(cue);
    }

    fn set_volume(&mut self, channel: AudioChannel, gain_db: f32) {
        self.volumes.lock().unwrap().push((channel, gain_db));
    }
}
