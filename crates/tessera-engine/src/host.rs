//! Host driver: screens, input, fixed-rate ticking and event delivery.
//!
//! [`Host`] is what a windowing layer talks to. It forwards key and
//! menu input, runs the [`BoardEngine`] at a constant rate through
//! [`FixedStep`], and hands every engine event to the injected
//! collaborators. The engine itself never sees a collaborator.

use std::time::{Duration, Instant};

use tessera_core::{AudioChannel, AudioSink, Direction, LeaderboardSink, NullSink, SaveSink};

use crate::board::{BoardEngine, TickReport};
use crate::clock::FixedStep;
use crate::config::ConfigError;
use crate::ingress::InputLatch;
use crate::metrics::HostMetrics;
use crate::outbox::{deliver, Outbox, Outgoing};
use crate::screen::{MenuButton, Shell, ShellAction};

// ── Collaborators ───────────────────────────────────────────────

/// The three fire-and-forget sinks a host delivers events to.
pub struct Collaborators {
    /// Receives save requests.
    pub save: Box<dyn SaveSink>,
    /// Receives death and win reports.
    pub leaderboard: Box<dyn LeaderboardSink>,
    /// Receives cues and volume changes.
    pub audio: Box<dyn AudioSink>,
}

impl Collaborators {
    /// Box three concrete sinks.
    pub fn new(
        save: impl SaveSink + 'static,
        leaderboard: impl LeaderboardSink + 'static,
        audio: impl AudioSink + 'static,
    ) -> Self {
        Self {
            save: Box::new(save),
            leaderboard: Box::new(leaderboard),
            audio: Box::new(audio),
        }
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::new(NullSink, NullSink, NullSink)
    }
}

enum Dispatch {
    Inline(Collaborators),
    Threaded(Outbox),
}

// ── FrameReport ─────────────────────────────────────────────────

/// What one [`Host::frame()`] call did.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Reports of the ticks that ran, oldest first.
    pub ticks: Vec<TickReport>,
    /// Whole ticks skipped because the frame exceeded the catch-up cap.
    pub dropped_ticks: u64,
    /// Whether the caller should render this frame.
    pub render: bool,
}

// ── Host ────────────────────────────────────────────────────────

/// Owns an engine, its shell and its collaborators.
pub struct Host {
    engine: BoardEngine,
    shell: Shell,
    input: InputLatch,
    clock: FixedStep,
    dispatch: Dispatch,
    epoch: Instant,
    metrics: HostMetrics,
    running: bool,
}

impl Host {
    /// Deliver events on the calling thread.
    ///
    /// The background channel is set to its unmuted gain immediately.
    pub fn new(engine: BoardEngine, collaborators: Collaborators) -> Self {
        Self::with_dispatch(engine, Dispatch::Inline(collaborators))
    }

    /// Deliver events from a dispatcher thread over a bounded outbox of
    /// `outbox_capacity` messages.
    pub fn threaded(engine: BoardEngine, collaborators: Collaborators) -> Result<Self, ConfigError> {
        let outbox = Outbox::spawn(collaborators, engine.config().outbox_capacity)?;
        Ok(Self::with_dispatch(engine, Dispatch::Threaded(outbox)))
    }

    fn with_dispatch(engine: BoardEngine, dispatch: Dispatch) -> Self {
        let clock = FixedStep::new(
            engine.config().tick_duration(),
            engine.config().max_catch_up_ticks,
        );
        let shell = Shell::new();
        let mut host = Self {
            engine,
            shell,
            input: InputLatch::new(),
            clock,
            dispatch,
            epoch: Instant::now(),
            metrics: HostMetrics::default(),
            running: true,
        };
        let gain_db = host.shell.background_gain_db();
        host.send(Outgoing::Volume {
            channel: AudioChannel::Background,
            gain_db,
        });
        host
    }

    /// The engine.
    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    /// The menu shell.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// False once Quit has been pressed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Delivery counters.
    pub fn metrics(&self) -> HostMetrics {
        let mut metrics = self.metrics;
        if let Dispatch::Threaded(outbox) = &self.dispatch {
            metrics.events_dispatched = outbox.dispatched();
        }
        metrics
    }

    /// A direction key went down.
    pub fn key_down(&mut self, dir: Direction) {
        self.input.key_down(dir);
    }

    /// A direction key went up.
    pub fn key_up(&mut self, dir: Direction) {
        self.input.key_up(dir);
    }

    /// Pointer moved over a menu button, or off all of them.
    pub fn hover(&mut self, button: Option<MenuButton>) {
        self.shell.hover(button);
    }

    /// A menu button was pressed.
    pub fn click(&mut self, button: MenuButton) {
        if let Some(action) = self.shell.click(button) {
            self.apply(action);
        }
    }

    /// Leave the current screen for the menu.
    pub fn back(&mut self) {
        if let Some(action) = self.shell.back() {
            self.apply(action);
        }
    }

    /// Abandon the current session and deal a new board.
    pub fn new_game(&mut self) {
        self.input.clear();
        self.clock.reset();
        self.engine.reset();
    }

    fn apply(&mut self, action: ShellAction) {
        match action {
            ShellAction::Navigated => {
                // Time spent on another screen is not owed to the board.
                self.input.clear();
                self.clock.reset();
            }
            ShellAction::Quit => self.running = false,
            ShellAction::SetVolume { channel, gain_db } => {
                self.send(Outgoing::Volume { channel, gain_db })
            }
        }
    }

    /// Run one engine tick if the board is showing.
    ///
    /// The latest fresh key press becomes the tick's command.
    pub fn step(&mut self, now_ms: u64) -> Option<TickReport> {
        if !self.shell.is_playing() {
            return None;
        }
        if let Some(dir) = self.input.poll() {
            self.engine.submit(dir);
        }
        let report = self.engine.update(now_ms);
        for event in &report.events {
            self.send(Outgoing::Event(event.clone()));
        }
        Some(report)
    }

    /// Account for `elapsed` real time and run the ticks it pays for.
    pub fn frame(&mut self, elapsed: Duration) -> FrameReport {
        let budget = self.clock.advance(elapsed);
        let now_ms = self.epoch.elapsed().as_millis() as u64;
        let ticks = (0..budget.updates)
            .filter_map(|_| self.step(now_ms))
            .collect();
        FrameReport {
            ticks,
            dropped_ticks: budget.dropped,
            render: budget.render,
        }
    }

    fn send(&mut self, message: Outgoing) {
        match &mut self.dispatch {
            Dispatch::Inline(collaborators) => {
                deliver(collaborators, message);
                self.metrics.events_dispatched += 1;
            }
            Dispatch::Threaded(outbox) => {
                if !outbox.send(message) {
                    self.metrics.events_dropped += 1;
                }
            }
        }
    }

    /// Flush pending deliveries and stop any dispatcher thread.
    pub fn shutdown(mut self) -> HostMetrics {
        if let Dispatch::Threaded(outbox) = &mut self.dispatch {
            outbox.close();
        }
        self.metrics()
    }
}
