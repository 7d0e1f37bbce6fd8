//! Per-tick and per-host counters.
//!
//! [`StepMetrics`] is returned from every
//! [`BoardEngine::update()`](crate::BoardEngine::update); the cumulative
//! fields carry across ticks until the engine is dropped, not across
//! resets. [`HostMetrics`] counts event delivery.

/// Counters collected during a single tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub tick_us: u64,
    /// 1 if the consumed command moved a tile, else 0.
    pub moves_applied: u32,
    /// Merges performed this tick.
    pub merges: u32,
    /// Tiles spawned this tick, including a new game's starting tiles.
    pub tiles_spawned: u32,
    /// Commands discarded this tick: terminal-state ignores plus
    /// submissions dropped because one was already pending.
    pub commands_ignored: u64,
    /// Tiles still sliding or scaling after this tick's reconciliation.
    pub animating_tiles: u32,
    /// Cumulative moves applied.
    pub total_moves: u64,
    /// Cumulative merges.
    pub total_merges: u64,
    /// Cumulative save requests raised.
    pub saves_requested: u64,
}

/// Event delivery counters kept by a [`Host`](crate::Host).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostMetrics {
    /// Events and volume commands handed to a collaborator.
    pub events_dispatched: u64,
    /// Events discarded because the outbox was full or closed.
    pub events_dropped: u64,
}
