//! Headless play loop.
//!
//! Demonstrates: open the file store → resume or deal → drive the host
//! at 60 Hz with a scripted key sequence → shut down and report.
//!
//! Run with `cargo run -p tessera-engine --example headless`. Saves go
//! to a temporary directory unless `TESSERA_SAVE_DIR` is set.

use std::path::PathBuf;

use tessera_core::{Direction, NullSink, SessionEvent, SessionState};
use tessera_engine::{BoardEngine, Collaborators, EngineConfig, Host, MenuButton};
use tessera_save::FileStore;

fn main() {
    println!("=== Tessera Headless Example ===\n");

    let dir: PathBuf = match std::env::var_os("TESSERA_SAVE_DIR") {
        Some(dir) => dir.into(),
        None => std::env::temp_dir().join("tessera-headless"),
    };
    let store = FileStore::open(&dir);
    let saved = match store.load_session() {
        Ok(saved) => saved,
        Err(e) => {
            println!("  discarding unreadable save: {e}");
            None
        }
    };
    let bests = store.leaderboard().bests();
    println!("Save dir: {}", dir.display());
    println!(
        "Best score {}, fastest win {:?} ms\n",
        bests.best_score, bests.fastest_time_ms
    );

    let config = EngineConfig {
        seed: 7,
        ..EngineConfig::default()
    };
    let engine = BoardEngine::new(config, saved, bests).unwrap();
    // One store persists the session, the other owns the leaderboard.
    let collaborators = Collaborators::new(FileStore::open(&dir), store, NullSink);
    let mut host = Host::threaded(engine, collaborators).unwrap();
    host.click(MenuButton::Play);

    let tick = host.engine().config().tick_duration();
    let script = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Down,
    ];
    let mut moves = 0u64;
    for frame in 0..2_000usize {
        // Tap a key every fourth frame.
        let dir = script[(frame / 4) % script.len()];
        if frame % 4 == 0 {
            host.key_down(dir);
        } else if frame % 4 == 2 {
            host.key_up(dir);
        }
        let report = host.frame(tick);
        for ran in &report.ticks {
            moves += u64::from(ran.metrics.moves_applied);
            for event in &ran.events {
                match event {
                    SessionEvent::Died {
                        highest_tile,
                        final_score,
                    } => println!("  died: highest {highest_tile}, score {final_score}"),
                    SessionEvent::Won { elapsed_ms } => println!("  won in {elapsed_ms} ms"),
                    _ => {}
                }
            }
        }
        if host.engine().state() != SessionState::Active {
            break;
        }
    }

    println!("\n{}", host.engine().grid());
    println!(
        "Moves {moves}, score {}, state {:?}",
        host.engine().scores().current_score(),
        host.engine().state()
    );
    let metrics = host.shutdown();
    println!(
        "Events dispatched {}, dropped {}",
        metrics.events_dispatched, metrics.events_dropped
    );
}
