//! Top-N tables of tiles, scores and completion times.

use tessera_core::Bests;

/// Entries kept per table.
pub const LEADERBOARD_SIZE: usize = 5;

/// The persisted leaderboard.
///
/// Tiles and scores are kept highest first. Times are kept fastest
/// first. Each table holds at most [`LEADERBOARD_SIZE`] entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaderboard {
    tiles: Vec<u32>,
    scores: Vec<u64>,
    times: Vec<u64>,
}

impl Leaderboard {
    /// An empty leaderboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from decoded tables, restoring order and size limits.
    pub fn from_parts(tiles: Vec<u32>, scores: Vec<u64>, times: Vec<u64>) -> Self {
        let mut board = Self::new();
        tiles.into_iter().for_each(|v| board.add_tile(v));
        scores.into_iter().for_each(|v| board.add_score(v));
        times.into_iter().for_each(|v| board.add_time(v));
        board
    }

    /// Record the highest tile of a finished game.
    pub fn add_tile(&mut self, value: u32) {
        insert_ranked(&mut self.tiles, value, |new, old| new > old);
    }

    /// Record the final score of a finished game.
    pub fn add_score(&mut self, score: u64) {
        insert_ranked(&mut self.scores, score, |new, old| new > old);
    }

    /// Record the time taken to win a game.
    pub fn add_time(&mut self, elapsed_ms: u64) {
        insert_ranked(&mut self.times, elapsed_ms, |new, old| new < old);
    }

    /// Best tiles, highest first.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Best scores, highest first.
    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    /// Fastest wins, fastest first.
    pub fn times(&self) -> &[u64] {
        &self.times
    }

    /// Highest recorded score, or 0.
    pub fn high_score(&self) -> u64 {
        self.scores.first().copied().unwrap_or(0)
    }

    /// Fastest recorded win, if any game has been won.
    pub fn fastest_time(&self) -> Option<u64> {
        self.times.first().copied()
    }

    /// The values a new session compares against.
    pub fn bests(&self) -> Bests {
        Bests {
            best_score: self.high_score(),
            fastest_time_ms: self.fastest_time(),
        }
    }
}

/// Insert `value` before the first entry it beats, then cap the table.
fn insert_ranked<T: Copy>(table: &mut Vec<T>, value: T, beats: impl Fn(T, T) -> bool) {
    let at = table
        .iter()
        .position(|&old| beats(value, old))
        .unwrap_or(table.len());
    table.insert(at, value);
    table.truncate(LEADERBOARD_SIZE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_bests() {
        let board = Leaderboard::new();
        assert_eq!(board.high_score(), 0);
        assert_eq!(board.fastest_time(), None);
        assert_eq!(board.bests(), Bests::default());
    }

    #[test]
    fn scores_rank_descending_and_cap() {
        let mut board = Leaderboard::new();
        for s in [300, 100, 700, 200, 500, 600, 50] {
            board.add_score(s);
        }
        assert_eq!(board.scores(), &[700, 600, 500, 300, 200]);
        assert_eq!(board.high_score(), 700);
    }

    #[test]
    fn times_rank_ascending() {
        let mut board = Leaderboard::new();
        for t in [90_000, 45_000, 120_000] {
            board.add_time(t);
        }
        assert_eq!(board.times(), &[45_000, 90_000, 120_000]);
        assert_eq!(board.fastest_time(), Some(45_000));
    }

    #[test]
    fn ties_keep_earlier_entry_first() {
        let mut board = Leaderboard::new();
        board.add_tile(256);
        board.add_tile(512);
        board.add_tile(256);
        assert_eq!(board.tiles(), &[512, 256, 256]);
    }

    #[test]
    fn from_parts_restores_order() {
        let board = Leaderboard::from_parts(vec![64, 1024], vec![1, 2, 3, 4, 5, 6], vec![9, 3]);
        assert_eq!(board.tiles(), &[1024, 64]);
        assert_eq!(board.scores(), &[6, 5, 4, 3, 2]);
        assert_eq!(board.times(), &[3, 9]);
    }
}
