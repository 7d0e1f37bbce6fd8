//! Event delivery to collaborators, inline or on a dispatcher thread.
//!
//! The threaded [`Outbox`] owns the collaborators on a thread of its
//! own and receives messages over a bounded crossbeam channel. Sends
//! never block the tick: a full channel drops the message and the host
//! counts it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, TrySendError};
use tessera_core::{AudioChannel, SessionEvent};

use crate::config::ConfigError;
use crate::host::Collaborators;

/// A message for the collaborators.
#[derive(Clone, Debug, PartialEq)]
pub enum Outgoing {
    /// An event raised by the engine.
    Event(SessionEvent),
    /// A volume change requested by the shell.
    Volume {
        /// Channel to adjust.
        channel: AudioChannel,
        /// New gain in decibels.
        gain_db: f32,
    },
}

/// Hand one message to the collaborator that owns it.
pub(crate) fn deliver(collaborators: &mut Collaborators, message: Outgoing) {
    match message {
        Outgoing::Event(SessionEvent::Cue(cue)) => collaborators.audio.play(cue),
        Outgoing::Event(SessionEvent::Died {
            highest_tile,
            final_score,
        }) => collaborators
            .leaderboard
            .record_death(highest_tile, final_score),
        Outgoing::Event(SessionEvent::Won { elapsed_ms }) => {
            collaborators.leaderboard.record_win(elapsed_ms)
        }
        Outgoing::Event(SessionEvent::SaveRequested(snapshot)) => {
            collaborators.save.save(&snapshot)
        }
        Outgoing::Volume { channel, gain_db } => {
            collaborators.audio.set_volume(channel, gain_db)
        }
    }
}

/// Bounded channel to a dispatcher thread that owns the collaborators.
pub(crate) struct Outbox {
    tx: Option<Sender<Outgoing>>,
    handle: Option<JoinHandle<Collaborators>>,
    dispatched: Arc<AtomicU64>,
}

impl Outbox {
    /// Move `collaborators` onto a new dispatcher thread.
    pub fn spawn(mut collaborators: Collaborators, capacity: usize) -> Result<Self, ConfigError> {
        let (tx, rx) = crossbeam_channel::bounded::<Outgoing>(capacity);
        let dispatched = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&dispatched);
        let handle = thread::Builder::new()
            .name("tessera-outbox".into())
            .spawn(move || {
                // Ends when every sender is dropped and the queue is drained.
                for message in rx {
                    deliver(&mut collaborators, message);
                    counter.fetch_add(1, Ordering::Release);
                }
                collaborators
            })
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: format!("outbox dispatcher: {e}"),
            })?;
        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
            dispatched,
        })
    }

    /// Queue a message. Returns `false` if it was dropped.
    pub fn send(&self, message: Outgoing) -> bool {
        match &self.tx {
            Some(tx) => match tx.try_send(message) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
            },
            None => false,
        }
    }

    /// Messages delivered so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Acquire)
    }

    /// Stop accepting messages, drain the queue and join the thread.
    ///
    /// Returns the collaborators unless the dispatcher panicked.
    pub fn close(&mut self) -> Option<Collaborators> {
        self.tx = None;
        self.handle.take().and_then(|h| h.join().ok())
    }
}

impl Drop for Outbox {
    fn drop(&mut self) {
        self.close();
    }
}
