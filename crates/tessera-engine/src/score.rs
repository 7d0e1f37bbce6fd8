//! Score and play-time bookkeeping for one session.

use tessera_core::{Bests, SessionSnapshot, SessionState};
use tessera_grid::{Grid, GridRules, Layout};

/// Current score, elapsed play time, and the leaderboard bests shown
/// beside them.
///
/// The best score is raised when the current score passes it; the best
/// time is display-only and never changed here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    current_score: u64,
    elapsed_ms: u64,
    best_score: u64,
    best_time_ms: Option<u64>,
}

impl ScoreTracker {
    /// A zeroed tracker that compares against `bests`.
    pub fn new(bests: Bests) -> Self {
        Self {
            current_score: 0,
            elapsed_ms: 0,
            best_score: bests.best_score,
            best_time_ms: bests.fastest_time_ms,
        }
    }

    /// Whether a fresh board must be dealt instead of resuming `saved`.
    ///
    /// True when there is no save, when the save holds no tiles, when it
    /// does not describe a legal board under `rules`, or when the saved
    /// board is already dead or won.
    pub fn new_game(saved: Option<&SessionSnapshot>, rules: GridRules) -> bool {
        let Some(saved) = saved.filter(|s| !s.is_empty()) else {
            return true;
        };
        match Grid::from_values(&saved.cells, rules, Layout::default()) {
            Ok(grid) => grid.is_dead() || grid.is_won(),
            Err(_) => true,
        }
    }

    /// Restore score and elapsed time from a resumed save.
    pub fn restore(&mut self, saved: &SessionSnapshot) {
        self.current_score = saved.score;
        self.elapsed_ms = saved.elapsed_ms;
    }

    /// Credit one merge with the value of the tile it produced.
    pub fn register_merge(&mut self, new_tile_value: u32) {
        self.current_score += u64::from(new_tile_value);
    }

    /// Update elapsed play time.
    ///
    /// Ignored once the session is terminal or before the first move, so
    /// the last running value stays frozen.
    pub fn tick(&mut self, elapsed_since_start_ms: u64, state: SessionState, started: bool) {
        if started && !state.is_terminal() {
            self.elapsed_ms = elapsed_since_start_ms;
        }
    }

    /// Raise the best score to the current score if it is higher.
    /// Returns whether it was raised.
    pub fn raise_best(&mut self) -> bool {
        if self.current_score > self.best_score {
            self.best_score = self.current_score;
            true
        } else {
            false
        }
    }

    /// Zero score and time for a new game. Bests are kept.
    pub fn reset(&mut self) {
        self.current_score = 0;
        self.elapsed_ms = 0;
    }

    /// Score of the current session.
    pub fn current_score(&self) -> u64 {
        self.current_score
    }

    /// Play time of the current session in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Best known score, including the current session.
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Fastest recorded win, if any.
    pub fn best_time_ms(&self) -> Option<u64> {
        self.best_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::CELL_COUNT;

    fn saved(cells: [u32; CELL_COUNT]) -> SessionSnapshot {
        SessionSnapshot {
            cells,
            score: 500,
            elapsed_ms: 7_000,
        }
    }

    #[test]
    fn merge_credits_result_value() {
        let mut scores = ScoreTracker::default();
        scores.register_merge(64);
        scores.register_merge(128);
        assert_eq!(scores.current_score(), 192);
    }

    #[test]
    fn clock_waits_for_first_move_and_freezes() {
        let mut scores = ScoreTracker::default();
        scores.tick(500, SessionState::Active, false);
        assert_eq!(scores.elapsed_ms(), 0);

        scores.tick(1_200, SessionState::Active, true);
        assert_eq!(scores.elapsed_ms(), 1_200);

        scores.tick(9_999, SessionState::Won, true);
        assert_eq!(scores.elapsed_ms(), 1_200);
        scores.tick(9_999, SessionState::Dead, true);
        assert_eq!(scores.elapsed_ms(), 1_200);
    }

    #[test]
    fn best_rises_only_when_beaten() {
        let mut scores = ScoreTracker::new(Bests {
            best_score: 100,
            fastest_time_ms: Some(60_000),
        });
        scores.register_merge(64);
        assert!(!scores.raise_best());
        assert_eq!(scores.best_score(), 100);

        scores.register_merge(64);
        assert!(scores.raise_best());
        assert_eq!(scores.best_score(), 128);

        scores.reset();
        assert_eq!(scores.current_score(), 0);
        assert_eq!(scores.best_score(), 128);
        assert_eq!(scores.best_time_ms(), Some(60_000));
    }

    #[test]
    fn new_game_when_nothing_to_resume() {
        let rules = GridRules::default();
        assert!(ScoreTracker::new_game(None, rules));

        let mut cells = [0; CELL_COUNT];
        assert!(ScoreTracker::new_game(Some(&saved(cells)), rules));

        cells[0] = 32;
        assert!(!ScoreTracker::new_game(Some(&saved(cells)), rules));

        cells[1] = 33;
        assert!(ScoreTracker::new_game(Some(&saved(cells)), rules));
    }

    #[test]
    fn new_game_after_finished_session() {
        let rules = GridRules::default();
        let mut won = [0; CELL_COUNT];
        won[4] = 2048;
        assert!(ScoreTracker::new_game(Some(&saved(won)), rules));

        let mut dead = [0; CELL_COUNT];
        for (i, v) in dead.iter_mut().enumerate() {
            *v = if (i / 4 + i % 4) % 2 == 0 { 32 } else { 64 };
        }
        assert!(ScoreTracker::new_game(Some(&saved(dead)), rules));
    }

    #[test]
    fn restore_copies_score_and_time() {
        let mut scores = ScoreTracker::default();
        scores.restore(&saved([0; CELL_COUNT]));
        assert_eq!(scores.current_score(), 500);
        assert_eq!(scores.elapsed_ms(), 7_000);
    }
}
