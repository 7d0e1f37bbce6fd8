//! Command intake: edge-triggered key latch and the one-deep command slot.
//!
//! Keys arrive as raw down/up transitions from whatever windowing layer
//! the host uses. [`InputLatch`] turns them into "freshly pressed since
//! the last poll" edges, so holding a key never repeats a move.
//! [`CommandSlot`] holds at most one direction between ticks; a second
//! submission before the engine consumes the first is dropped.

use tessera_core::Direction;

// ── InputLatch ──────────────────────────────────────────────────

/// Edge-triggered key state for the four direction keys.
#[derive(Clone, Debug, Default)]
pub struct InputLatch {
    held: [bool; 4],
    pressed: [bool; 4],
}

impl InputLatch {
    /// An idle latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Auto-repeat of a held key is not a new press.
    pub fn key_down(&mut self, dir: Direction) {
        let i = dir.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    /// Record a key-up.
    pub fn key_up(&mut self, dir: Direction) {
        self.held[dir.index()] = false;
    }

    /// Whether `dir` is currently held down.
    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    /// Take the first fresh press since the last poll, in
    /// [`Direction::ALL`] order, and forget any others.
    pub fn poll(&mut self) -> Option<Direction> {
        let fresh = Direction::ALL
            .into_iter()
            .find(|dir| self.pressed[dir.index()]);
        self.pressed = [false; 4];
        fresh
    }

    /// Drop held and pending state, e.g. when focus changes screen.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ── CommandSlot ─────────────────────────────────────────────────

/// Whether a submitted command was kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Stored; the next tick will consume it.
    Queued,
    /// A command was already pending for this tick.
    Dropped,
}

/// What the engine did with the pending command on a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommandOutcome {
    /// No command was pending.
    #[default]
    Idle,
    /// The command moved or merged at least one tile.
    Moved(Direction),
    /// The command changed nothing; no tile spawned.
    Blocked(Direction),
    /// The session is dead or won; the command was discarded.
    IgnoredTerminal(Direction),
}

/// One-deep pending command buffer.
#[derive(Clone, Debug, Default)]
pub struct CommandSlot {
    pending: Option<Direction>,
    dropped: u64,
}

impl CommandSlot {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a command. The first one per tick wins.
    pub fn submit(&mut self, dir: Direction) -> Admission {
        if self.pending.is_some() {
            self.dropped += 1;
            Admission::Dropped
        } else {
            self.pending = Some(dir);
            Admission::Queued
        }
    }

    /// Remove and return the pending command.
    pub fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    /// Pending command, if any.
    pub fn peek(&self) -> Option<Direction> {
        self.pending
    }

    /// Discard the pending command.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Read and zero the count of dropped submissions.
    pub fn take_dropped(&mut self) -> u64 {
        std::mem::take(&mut self.dropped)
    }
}
