//! Integration test: end-to-end session scenarios through `BoardEngine`.
//!
//! Each scenario resumes a hand-written board, feeds commands one tick
//! at a time, and checks the grid, score, clock, state and the events
//! raised for collaborators.

use proptest::prelude::*;
use tessera_core::{Bests, Cell, Cue, Direction, SessionEvent, SessionSnapshot, SessionState};
use tessera_engine::{BoardEngine, CommandOutcome, EngineConfig};
use tessera_test_utils::fixtures::{CHECKERBOARD, ONE_MOVE_FROM_DEAD};
use tessera_test_utils::snapshot_from_rows;

fn resume(saved: SessionSnapshot) -> BoardEngine {
    BoardEngine::new(EngineConfig::default(), Some(saved), Bests::default()).unwrap()
}

fn value_at(engine: &BoardEngine, row: usize, col: usize) -> u32 {
    let cell = Cell::new(row, col).unwrap();
    engine.grid().tile(cell).map_or(0, |t| t.value())
}

fn saves(events: &[SessionEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SessionEvent::SaveRequested(_)))
        .count()
}

// ── Moves and merges ─────────────────────────────────────────────────

#[test]
fn left_merge_lands_at_the_wall() {
    let mut engine = resume(snapshot_from_rows(
        [[32, 32, 0, 0], [0; 4], [0; 4], [0; 4]],
        0,
        0,
    ));
    engine.submit(Direction::Left);
    let report = engine.update(0);

    assert_eq!(report.outcome, CommandOutcome::Moved(Direction::Left));
    assert_eq!(value_at(&engine, 0, 0), 64);
    assert_eq!(engine.scores().current_score(), 64);
    assert_eq!(engine.grid().tiles().count(), 2);
}

#[test]
fn a_tile_merges_once_per_move() {
    let mut engine = resume(snapshot_from_rows(
        [[32, 32, 32, 32], [0; 4], [0; 4], [0; 4]],
        0,
        0,
    ));
    engine.submit(Direction::Left);
    let report = engine.update(0);

    assert_eq!(value_at(&engine, 0, 0), 64);
    assert_eq!(value_at(&engine, 0, 1), 64);
    assert_eq!(engine.scores().current_score(), 128);
    assert_eq!(report.metrics.merges, 2);
}

#[test]
fn merged_tile_does_not_chain() {
    let mut engine = resume(snapshot_from_rows(
        [[32, 32, 64, 0], [0; 4], [0; 4], [0; 4]],
        0,
        0,
    ));
    engine.submit(Direction::Left);
    engine.update(0);

    assert_eq!(value_at(&engine, 0, 0), 64);
    assert_eq!(value_at(&engine, 0, 1), 64);
    assert_eq!(engine.scores().current_score(), 64);
}

#[test]
fn alternating_row_is_blocked() {
    let saved = snapshot_from_rows([[32, 64, 32, 64], [0; 4], [0; 4], [0; 4]], 10, 0);
    let mut engine = resume(saved.clone());
    for dir in [Direction::Left, Direction::Right, Direction::Up] {
        engine.submit(dir);
        let report = engine.update(0);
        assert_eq!(report.outcome, CommandOutcome::Blocked(dir));
        assert!(report.events.is_empty());
    }
    assert_eq!(engine.snapshot().cells, saved.cells);
    assert_eq!(engine.scores().current_score(), 10);
    assert!(!engine.has_started());
}

// ── Terminal states ──────────────────────────────────────────────────

#[test]
fn last_gap_filled_kills_the_session() {
    let mut engine = resume(snapshot_from_rows(ONE_MOVE_FROM_DEAD, 5_000, 0));
    engine.submit(Direction::Left);
    let report = engine.update(0);

    assert_eq!(engine.state(), SessionState::Dead);
    assert!(engine.grid().is_full());
    assert_eq!(report.events.len(), 3);
    assert_eq!(report.events[0], SessionEvent::Cue(Cue::Click));
    assert_eq!(
        report.events[1],
        SessionEvent::Died {
            highest_tile: 1024,
            final_score: 5_000
        }
    );
    assert!(matches!(report.events[2], SessionEvent::SaveRequested(_)));

    let frozen = engine.snapshot();
    engine.submit(Direction::Up);
    let report = engine.update(1_000);
    assert_eq!(report.outcome, CommandOutcome::IgnoredTerminal(Direction::Up));
    assert_eq!(report.metrics.commands_ignored, 1);
    assert!(report.events.is_empty());
    assert_eq!(engine.snapshot(), frozen);
    assert_eq!(engine.state(), SessionState::Dead);
}

#[test]
fn reaching_the_threshold_wins_and_freezes_the_clock() {
    let mut engine = resume(snapshot_from_rows(
        [[1024, 1024, 0, 0], [0, 0, 0, 32], [0; 4], [0; 4]],
        0,
        0,
    ));
    engine.submit(Direction::Up);
    engine.update(1_000);
    engine.update(3_000);
    assert_eq!(engine.scores().elapsed_ms(), 2_000);

    engine.submit(Direction::Left);
    let report = engine.update(5_000);
    assert_eq!(engine.state(), SessionState::Won);
    assert_eq!(value_at(&engine, 0, 0), 2048);
    assert!(report
        .events
        .contains(&SessionEvent::Won { elapsed_ms: 4_000 }));
    assert_eq!(saves(&report.events), 1);

    engine.update(60_000);
    assert_eq!(engine.scores().elapsed_ms(), 4_000);
    assert_eq!(engine.state(), SessionState::Won);
    let later = engine.update(61_000);
    assert!(later.events.is_empty());
}

#[test]
fn dying_and_winning_in_one_move_reports_both() {
    // Left merges 1024+1024 at the wall; the spawn fills (3,3) and no
    // equal neighbours remain anywhere.
    let mut engine = resume(snapshot_from_rows(
        [
            [128, 256, 128, 256],
            [256, 128, 256, 128],
            [128, 256, 128, 256],
            [1024, 1024, 512, 1024],
        ],
        3_000,
        7_000,
    ));
    engine.submit(Direction::Left);
    let report = engine.update(0);

    assert_eq!(report.outcome, CommandOutcome::Moved(Direction::Left));
    assert_eq!(value_at(&engine, 3, 0), 2048);
    assert!(engine.grid().is_dead());
    assert_eq!(engine.state(), SessionState::Won);
    assert_eq!(report.events.len(), 4);
    assert_eq!(report.events[0], SessionEvent::Cue(Cue::Click));
    assert_eq!(
        report.events[1],
        SessionEvent::Died {
            highest_tile: 2048,
            final_score: 5_048
        }
    );
    assert_eq!(report.events[2], SessionEvent::Won { elapsed_ms: 7_000 });
    assert!(matches!(report.events[3], SessionEvent::SaveRequested(_)));
    assert_eq!(saves(&report.events), 1);

    let later = engine.update(1_000);
    assert!(later.events.is_empty());
    assert_eq!(engine.state(), SessionState::Won);
}

#[test]
fn completed_saves_start_a_new_game() {
    let mut won = [[0; 4]; 4];
    won[2][1] = 2048;
    for rows in [CHECKERBOARD, won] {
        let engine = resume(snapshot_from_rows(rows, 9_999, 1_234));
        assert_eq!(engine.state(), SessionState::Active);
        assert_eq!(engine.grid().tiles().count(), 2);
        assert_eq!(engine.scores().current_score(), 0);
        assert_eq!(engine.scores().elapsed_ms(), 0);
    }
}

#[test]
fn empty_save_starts_a_new_game() {
    let mut engine = resume(snapshot_from_rows([[0; 4]; 4], 300, 2_000));
    assert_eq!(engine.grid().tiles().count(), 2);
    assert_eq!(engine.scores().current_score(), 0);
    assert_eq!(engine.scores().elapsed_ms(), 0);

    let report = engine.update(0);
    assert_eq!(saves(&report.events), 1);
    let moved = Direction::ALL.into_iter().any(|dir| {
        engine.submit(dir);
        matches!(engine.update(0).outcome, CommandOutcome::Moved(_))
    });
    assert!(moved);
}

#[test]
fn corrupted_save_starts_a_new_game() {
    let mut engine = resume(snapshot_from_rows(
        [[48, 0, 0, 0], [0; 4], [0; 4], [0; 4]],
        900,
        0,
    ));
    assert_eq!(engine.scores().current_score(), 0);
    assert_eq!(engine.grid().tiles().count(), 2);
    let report = engine.update(0);
    assert_eq!(saves(&report.events), 1);
}

#[test]
fn reset_after_death_returns_to_active() {
    let mut engine = resume(snapshot_from_rows(ONE_MOVE_FROM_DEAD, 5_000, 0));
    engine.submit(Direction::Left);
    engine.update(0);
    assert_eq!(engine.state(), SessionState::Dead);

    engine.reset();
    assert_eq!(engine.state(), SessionState::Active);
    assert_eq!(engine.grid().tiles().count(), 2);
    assert_eq!(engine.scores().best_score(), 5_000);
    assert!(!engine.grid().is_dead());
}

#[test]
fn best_score_seeded_from_leaderboard() {
    let bests = Bests {
        best_score: 10_000,
        fastest_time_ms: Some(90_000),
    };
    let mut engine = BoardEngine::new(
        EngineConfig::default(),
        Some(snapshot_from_rows(
            [[32, 32, 0, 0], [0; 4], [0; 4], [0; 4]],
            0,
            0,
        )),
        bests,
    )
    .unwrap();
    engine.submit(Direction::Left);
    engine.update(0);
    assert_eq!(engine.scores().best_score(), 10_000);
    assert_eq!(engine.scores().best_time_ms(), Some(90_000));
}

// ── Properties ───────────────────────────────────────────────────────

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Down),
    ]
}

proptest! {
    #[test]
    fn random_play_keeps_session_consistent(
        seed in any::<u64>(),
        moves in prop::collection::vec(direction(), 1..200),
    ) {
        let config = EngineConfig { seed, ..EngineConfig::default() };
        let mut engine = BoardEngine::new(config, None, Bests::default()).unwrap();
        let mut score = 0;
        let mut sum = engine.grid().tile_sum();
        let mut terminal: Option<SessionState> = None;

        for (i, dir) in moves.into_iter().enumerate() {
            engine.submit(dir);
            let report = engine.update(i as u64 * 16);

            prop_assert!(engine.scores().current_score() >= score);
            prop_assert!(engine.grid().tile_sum() >= sum);
            prop_assert!(engine.scores().best_score() >= engine.scores().current_score());
            if let Some(state) = terminal {
                prop_assert_eq!(engine.state(), state);
                prop_assert!(!matches!(report.outcome, CommandOutcome::Moved(_)));
            }
            if engine.state().is_terminal() {
                terminal = Some(engine.state());
            }
            score = engine.scores().current_score();
            sum = engine.grid().tile_sum();
        }
    }
}
