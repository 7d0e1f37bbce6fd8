//! The board engine: one play session, advanced one tick at a time.
//!
//! [`BoardEngine`] is a callable struct with no threads and no I/O.
//! Commands go in through [`submit()`](BoardEngine::submit); each
//! [`update()`](BoardEngine::update) consumes at most one of them,
//! applies it to the grid, advances scoring and animation, evaluates
//! terminal transitions, and returns what happened as a [`TickReport`].
//!
//! # Tick order
//!
//! 1. Periodic save counter.
//! 2. Play clock: runs only while `Active` and after the first move.
//! 3. Pending command: ignored if terminal, else moved, merged, spawned.
//! 4. Best score raised.
//! 5. Tile positions and scale animations reconciled.
//! 6. Won latched, then `Active -> Dead` / `Active -> Won` evaluated.
//!    Each transition raises its leaderboard event exactly once and
//!    requests a save.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tessera_core::{Bests, Cue, Direction, SessionEvent, SessionSnapshot, SessionState, TickId};
use tessera_grid::{Grid, GridRules, STARTING_TILES};

use crate::config::{ConfigError, EngineConfig};
use crate::ingress::{Admission, CommandOutcome, CommandSlot};
use crate::metrics::StepMetrics;
use crate::score::ScoreTracker;

// Compile-time assertion: the engine can be moved to a driver thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<BoardEngine>();
    }
};

// ── TickReport ──────────────────────────────────────────────────

/// Result of one [`BoardEngine::update()`] call.
#[derive(Clone, Debug)]
pub struct TickReport {
    /// Tick that just ran.
    pub tick: TickId,
    /// What happened to the pending command.
    pub outcome: CommandOutcome,
    /// Events for collaborators, in the order they were raised.
    pub events: Vec<SessionEvent>,
    /// Counters for this tick.
    pub metrics: StepMetrics,
}

// ── BoardEngine ─────────────────────────────────────────────────

/// Single-threaded owner of one play session.
///
/// # Example
///
/// ```
/// use tessera_core::{Bests, Direction, SessionState};
/// use tessera_engine::{BoardEngine, EngineConfig};
///
/// let mut engine = BoardEngine::new(EngineConfig::default(), None, Bests::default()).unwrap();
/// engine.submit(Direction::Left);
/// let report = engine.update(0);
/// assert_eq!(report.tick.0, 1);
/// assert_eq!(engine.state(), SessionState::Active);
/// ```
pub struct BoardEngine {
    config: EngineConfig,
    rules: GridRules,
    rng: ChaCha8Rng,
    grid: Grid,
    scores: ScoreTracker,
    state: SessionState,
    slot: CommandSlot,
    tick: TickId,
    ticks_since_save: u64,
    started: bool,
    start_mark_ms: u64,
    elapsed_offset_ms: u64,
    dead_reported: bool,
    won_reported: bool,
    pending_events: Vec<SessionEvent>,
    pending_spawns: u32,
    totals: StepMetrics,
}

impl BoardEngine {
    /// Start a session.
    ///
    /// `saved` is resumed unless [`ScoreTracker::new_game`] says a fresh
    /// board is needed, in which case two tiles are dealt and a save is
    /// requested on the first tick. A resumed board gets its score and
    /// elapsed time back and has dead and won evaluated once; it does
    /// not re-raise terminal events. `bests` come from the leaderboard.
    pub fn new(
        config: EngineConfig,
        saved: Option<SessionSnapshot>,
        bests: Bests,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = config.rules();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut engine = Self {
            grid: Grid::new(rules, config.layout),
            config,
            rules,
            rng,
            scores: ScoreTracker::new(bests),
            state: SessionState::Active,
            slot: CommandSlot::new(),
            tick: TickId::default(),
            ticks_since_save: 0,
            started: false,
            start_mark_ms: 0,
            elapsed_offset_ms: 0,
            dead_reported: false,
            won_reported: false,
            pending_events: Vec::new(),
            pending_spawns: 0,
            totals: StepMetrics::default(),
        };

        let resumed = saved
            .filter(|s| !ScoreTracker::new_game(Some(s), rules))
            .and_then(|s| {
                Grid::from_values(&s.cells, rules, engine.config.layout)
                    .ok()
                    .map(|grid| (grid, s))
            });
        match resumed {
            Some((grid, saved)) => {
                engine.grid = grid;
                engine.scores.restore(&saved);
                engine.elapsed_offset_ms = saved.elapsed_ms;
            }
            None => engine.deal(),
        }
        Ok(engine)
    }

    /// Offer a directional command for the next tick.
    ///
    /// Only one command is held; further submissions before the next
    /// [`update()`](Self::update) are dropped and counted.
    pub fn submit(&mut self, dir: Direction) -> Admission {
        self.slot.submit(dir)
    }

    /// Run one tick. `now_ms` is a monotonic wall-clock reading.
    pub fn update(&mut self, now_ms: u64) -> TickReport {
        let tick_start = Instant::now();
        self.tick = TickId(self.tick.0 + 1);
        let mut metrics = StepMetrics {
            tiles_spawned: std::mem::take(&mut self.pending_spawns),
            commands_ignored: self.slot.take_dropped(),
            ..StepMetrics::default()
        };
        let mut events = std::mem::take(&mut self.pending_events);

        // 1. Periodic save.
        self.ticks_since_save += 1;
        if self.ticks_since_save >= self.config.save_interval_ticks {
            self.ticks_since_save = 0;
            events.push(SessionEvent::SaveRequested(self.snapshot()));
        }

        // 2. Play clock.
        if self.state == SessionState::Active {
            if self.started {
                let running = now_ms.saturating_sub(self.start_mark_ms);
                self.scores
                    .tick(self.elapsed_offset_ms + running, self.state, self.started);
            } else {
                self.start_mark_ms = now_ms;
            }
        }

        // 3. Pending command.
        let outcome = match self.slot.take() {
            None => CommandOutcome::Idle,
            Some(dir) if self.state.is_terminal() => {
                metrics.commands_ignored += 1;
                CommandOutcome::IgnoredTerminal(dir)
            }
            Some(dir) => {
                let moved = self.grid.apply_move(dir, &mut self.rng);
                for &value in &moved.merges {
                    self.scores.register_merge(value);
                }
                metrics.merges = moved.merges.len() as u32;
                if moved.moved {
                    metrics.moves_applied = 1;
                    metrics.tiles_spawned += u32::from(moved.spawned.is_some());
                    events.push(SessionEvent::Cue(Cue::Click));
                    if !self.started {
                        self.started = !self.grid.is_dead();
                    }
                    CommandOutcome::Moved(dir)
                } else {
                    CommandOutcome::Blocked(dir)
                }
            }
        };

        // 4. Best score.
        self.scores.raise_best();

        // 5. Animation.
        metrics.animating_tiles = self.grid.reconcile_positions() as u32;

        // 6. Terminal transitions.
        let won = self.grid.refresh_won();
        let dead = self.grid.is_dead();
        let mut finished = false;
        if dead && !self.dead_reported {
            self.dead_reported = true;
            finished = true;
            events.push(SessionEvent::Died {
                highest_tile: self.grid.highest_tile(),
                final_score: self.scores.current_score(),
            });
        }
        if won && !self.won_reported {
            self.won_reported = true;
            finished = true;
            events.push(SessionEvent::Won {
                elapsed_ms: self.scores.elapsed_ms(),
            });
        }
        if finished {
            events.push(SessionEvent::SaveRequested(self.snapshot()));
        }
        self.state = if won {
            SessionState::Won
        } else if dead {
            SessionState::Dead
        } else {
            SessionState::Active
        };

        self.totals.total_moves += u64::from(metrics.moves_applied);
        self.totals.total_merges += u64::from(metrics.merges);
        self.totals.saves_requested += events
            .iter()
            .filter(|e| matches!(e, SessionEvent::SaveRequested(_)))
            .count() as u64;
        metrics.total_moves = self.totals.total_moves;
        metrics.total_merges = self.totals.total_merges;
        metrics.saves_requested = self.totals.saves_requested;
        metrics.tick_us = tick_start.elapsed().as_micros() as u64;

        TickReport {
            tick: self.tick,
            outcome,
            events,
            metrics,
        }
    }

    /// Abandon the session and deal a new board.
    ///
    /// Any pending command and in-flight events are discarded. Bests are
    /// kept; score, clock, tick counter and terminal state are zeroed.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.rules, self.config.layout);
        self.scores.reset();
        self.state = SessionState::Active;
        self.slot.clear();
        self.tick = TickId::default();
        self.ticks_since_save = 0;
        self.started = false;
        self.elapsed_offset_ms = 0;
        self.dead_reported = false;
        self.won_reported = false;
        self.pending_events.clear();
        self.pending_spawns = 0;
        self.deal();
    }

    fn deal(&mut self) {
        for _ in 0..STARTING_TILES {
            self.grid.spawn_random(&mut self.rng);
        }
        self.pending_spawns += STARTING_TILES as u32;
        self.pending_events
            .push(SessionEvent::SaveRequested(self.snapshot()));
    }

    /// Current cell values, score and elapsed time.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cells: self.grid.values(),
            score: self.scores.current_score(),
            elapsed_ms: self.scores.elapsed_ms(),
        }
    }

    /// The board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Score and time.
    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    /// Session state after the last tick.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ticks run since the session started or was reset.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Whether the play clock is running.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::CELL_COUNT;

    fn row_save(first_row: [u32; 4], score: u64) -> SessionSnapshot {
        let mut cells = [0; CELL_COUNT];
        cells[..4].copy_from_slice(&first_row);
        SessionSnapshot {
            cells,
            score,
            elapsed_ms: 0,
        }
    }

    fn engine_from(save: SessionSnapshot) -> BoardEngine {
        BoardEngine::new(EngineConfig::default(), Some(save), Bests::default()).unwrap()
    }

    #[test]
    fn invalid_config_rejected() {
        let config = EngineConfig {
            save_interval_ticks: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            BoardEngine::new(config, None, Bests::default()),
            Err(ConfigError::SaveIntervalZero)
        ));
    }

    #[test]
    fn fresh_game_deals_two_and_saves() {
        let mut engine = BoardEngine::new(EngineConfig::default(), None, Bests::default()).unwrap();
        assert_eq!(engine.grid().tiles().count(), 2);
        let report = engine.update(0);
        assert_eq!(report.metrics.tiles_spawned, 2);
        assert!(matches!(
            report.events.as_slice(),
            [SessionEvent::SaveRequested(_)]
        ));
    }

    #[test]
    fn resumed_game_does_not_save_immediately() {
        let mut engine = engine_from(row_save([32, 0, 0, 0], 96));
        assert_eq!(engine.scores().current_score(), 96);
        let report = engine.update(0);
        assert!(report.events.is_empty());
        assert_eq!(report.metrics.tiles_spawned, 0);
    }

    #[test]
    fn merge_scores_and_clicks() {
        let mut engine = engine_from(row_save([32, 32, 0, 0], 0));
        engine.submit(Direction::Left);
        let report = engine.update(0);
        assert_eq!(report.outcome, CommandOutcome::Moved(Direction::Left));
        assert_eq!(engine.scores().current_score(), 64);
        assert_eq!(engine.scores().best_score(), 64);
        assert_eq!(report.metrics.merges, 1);
        assert_eq!(report.metrics.tiles_spawned, 1);
        assert_eq!(report.events, vec![SessionEvent::Cue(Cue::Click)]);
    }

    #[test]
    fn blocked_move_is_silent() {
        let mut engine = engine_from(row_save([32, 64, 0, 0], 0));
        engine.submit(Direction::Left);
        let report = engine.update(0);
        assert_eq!(report.outcome, CommandOutcome::Blocked(Direction::Left));
        assert!(report.events.is_empty());
        assert!(!engine.has_started());
    }

    #[test]
    fn clock_starts_on_first_move() {
        let mut engine = engine_from(row_save([32, 0, 0, 0], 0));
        engine.update(1_000);
        engine.update(2_000);
        assert_eq!(engine.scores().elapsed_ms(), 0);

        engine.submit(Direction::Right);
        engine.update(3_000);
        assert!(engine.has_started());
        engine.update(4_500);
        assert_eq!(engine.scores().elapsed_ms(), 1_500);
    }

    #[test]
    fn resumed_clock_continues_from_saved_time() {
        let mut save = row_save([32, 0, 0, 0], 0);
        save.elapsed_ms = 60_000;
        let mut engine = engine_from(save);
        engine.submit(Direction::Right);
        engine.update(10);
        engine.update(1_010);
        assert_eq!(engine.scores().elapsed_ms(), 61_000);
    }

    #[test]
    fn second_submit_is_dropped_and_counted() {
        let mut engine = engine_from(row_save([32, 0, 0, 0], 0));
        assert_eq!(engine.submit(Direction::Right), Admission::Queued);
        assert_eq!(engine.submit(Direction::Left), Admission::Dropped);
        let report = engine.update(0);
        assert_eq!(report.outcome, CommandOutcome::Moved(Direction::Right));
        assert_eq!(report.metrics.commands_ignored, 1);
        assert_eq!(engine.update(0).outcome, CommandOutcome::Idle);
    }

    #[test]
    fn periodic_save_every_interval() {
        let config = EngineConfig {
            save_interval_ticks: 3,
            ..EngineConfig::default()
        };
        let mut engine =
            BoardEngine::new(config, Some(row_save([32, 0, 0, 0], 0)), Bests::default()).unwrap();
        let saves: Vec<usize> = (0..9)
            .map(|_| {
                engine
                    .update(0)
                    .events
                    .iter()
                    .filter(|e| matches!(e, SessionEvent::SaveRequested(_)))
                    .count()
            })
            .collect();
        assert_eq!(saves, vec![0, 0, 1, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn reset_deals_fresh_board_and_keeps_best() {
        let mut engine = engine_from(row_save([32, 32, 0, 0], 0));
        engine.submit(Direction::Left);
        engine.update(0);
        engine.submit(Direction::Up);
        engine.reset();

        assert_eq!(engine.state(), SessionState::Active);
        assert_eq!(engine.current_tick(), TickId(0));
        assert_eq!(engine.scores().current_score(), 0);
        assert_eq!(engine.scores().best_score(), 64);
        assert_eq!(engine.grid().tiles().count(), 2);

        let report = engine.update(0);
        assert_eq!(report.outcome, CommandOutcome::Idle);
        assert!(matches!(
            report.events.as_slice(),
            [SessionEvent::SaveRequested(_)]
        ));
    }

    #[test]
    fn seed_determines_the_game() {
        let play = |seed: u64| {
            let config = EngineConfig {
                seed,
                ..EngineConfig::default()
            };
            let mut engine = BoardEngine::new(config, None, Bests::default()).unwrap();
            for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
                engine.submit(dir);
                engine.update(0);
            }
            engine.snapshot()
        };
        assert_eq!(play(17), play(17));
    }
}
