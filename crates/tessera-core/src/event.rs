//! Session state and the events the engine raises for its host.

use crate::snapshot::SessionSnapshot;

/// Whole-session state machine.
///
/// `Active` is initial. `Dead` and `Won` are terminal and sticky: only
/// an explicit new game returns the session to `Active`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Moves are accepted.
    #[default]
    Active,
    /// The board is full and nothing can merge.
    Dead,
    /// A tile reached the win threshold.
    Won,
}

impl SessionState {
    /// Whether the session has ended.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Active)
    }
}

/// A sound effect the engine asks its audio collaborator to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// A move changed the board.
    Click,
}

/// A mixer channel whose volume the shell may adjust.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioChannel {
    /// Looping background music.
    Background,
    /// One-shot effects such as [`Cue::Click`].
    Effects,
}

/// A notification raised by the engine during a tick.
///
/// Events are fire-and-forget from the engine's point of view: the host
/// forwards them to its collaborators and the engine never observes the
/// outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Play a sound cue.
    Cue(Cue),
    /// The session just transitioned to [`SessionState::Dead`].
    Died {
        /// The largest tile on the final board.
        highest_tile: u32,
        /// The score at the moment of death.
        final_score: u64,
    },
    /// The session just reached the win threshold.
    Won {
        /// Elapsed play time at the moment of the win.
        elapsed_ms: u64,
    },
    /// Hand the current session to the save routine.
    SaveRequested(SessionSnapshot),
}
