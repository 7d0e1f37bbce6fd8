//! Fixed-timestep accumulator.
//!
//! The host measures real time between frames and asks [`FixedStep`]
//! how many logical updates that time pays for. Updates run at a
//! constant rate regardless of frame rate; a frame renders only if at
//! least one update ran. A stall longer than the catch-up cap is not
//! replayed: the whole ticks beyond the cap are dropped and only the
//! fractional remainder carries over.

use std::time::Duration;

/// Updates and render decision for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameBudget {
    /// Logical updates to run now.
    pub updates: u32,
    /// Whole ticks discarded because they exceeded the catch-up cap.
    pub dropped: u64,
    /// Whether to render after the updates.
    pub render: bool,
}

/// Accumulates real time into whole logical ticks.
#[derive(Clone, Debug)]
pub struct FixedStep {
    tick: Duration,
    max_catch_up: u32,
    backlog: Duration,
}

impl FixedStep {
    /// A driver for ticks of length `tick`, running at most
    /// `max_catch_up` updates per frame.
    ///
    /// # Panics
    ///
    /// Panics if `tick` is zero or `max_catch_up` is zero.
    pub fn new(tick: Duration, max_catch_up: u32) -> Self {
        assert!(!tick.is_zero(), "FixedStep tick must be non-zero");
        assert!(max_catch_up > 0, "FixedStep catch-up cap must be at least 1");
        Self {
            tick,
            max_catch_up,
            backlog: Duration::ZERO,
        }
    }

    /// Length of one tick.
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Time accumulated toward the next tick.
    pub fn backlog(&self) -> Duration {
        self.backlog
    }

    /// Account for `elapsed` real time and return this frame's budget.
    pub fn advance(&mut self, elapsed: Duration) -> FrameBudget {
        self.backlog += elapsed;
        let tick_ns = self.tick.as_nanos();
        let whole = self.backlog.as_nanos() / tick_ns;
        let remainder = self.backlog.as_nanos() % tick_ns;
        // The remainder is below one tick, so it fits in u64 nanoseconds.
        self.backlog = Duration::from_nanos(remainder as u64);

        let cap = u128::from(self.max_catch_up);
        let updates = whole.min(cap) as u32;
        let dropped = whole.saturating_sub(cap) as u64;
        FrameBudget {
            updates,
            dropped,
            render: updates > 0,
        }
    }

    /// Forget accumulated time.
    pub fn reset(&mut self) {
        self.backlog = Duration::ZERO;
    }
}
