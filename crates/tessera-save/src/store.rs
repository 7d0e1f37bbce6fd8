//! File-backed save and leaderboard sink.

use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tessera_core::{LeaderboardSink, SaveSink, SessionSnapshot};

use crate::codec::{decode_leaderboard, decode_session, encode_leaderboard, encode_session};
use crate::error::SaveError;
use crate::leaderboard::Leaderboard;

/// File name of the in-progress session.
pub const SESSION_FILE: &str = "session.bin";
/// File name of the leaderboard.
pub const LEADERBOARD_FILE: &str = "leaderboard.bin";
/// Save directory under the user's home.
const DEFAULT_DIR_NAME: &str = ".2048";

/// Stores the session and leaderboard in a directory.
///
/// As a [`SaveSink`] or [`LeaderboardSink`] it never reports failure:
/// a write that fails is counted in [`failures`](Self::failures) and
/// otherwise ignored. Each file is written to a temporary sibling and
/// renamed into place, so a crash mid-write leaves the old file intact.
///
/// # Examples
///
/// ```no_run
/// use tessera_save::FileStore;
///
/// let dir = FileStore::default_dir().expect("HOME is set");
/// let store = FileStore::open(dir);
/// let resume = store.load_session().ok().flatten();
/// let bests = store.leaderboard().bests();
/// # let _ = (resume, bests);
/// ```
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    leaderboard: Leaderboard,
    failures: u64,
}

impl FileStore {
    /// `$HOME/.2048`, or `None` if no home directory is known.
    pub fn default_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_DIR_NAME))
    }

    /// Open a store rooted at `dir`, reading the leaderboard if present.
    ///
    /// An unreadable leaderboard is replaced by an empty one and counted
    /// as a failure. A missing one is simply empty.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            dir: dir.into(),
            leaderboard: Leaderboard::new(),
            failures: 0,
        };
        match store.load_leaderboard() {
            Ok(Some(board)) => store.leaderboard = board,
            Ok(None) => {}
            Err(_) => store.failures += 1,
        }
        store
    }

    /// Directory holding the save files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// In-memory leaderboard, including unsaved updates.
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Writes and reads that failed and were swallowed.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Read the saved session. `Ok(None)` if there is none.
    ///
    /// Tile values are not checked; the engine validates them against
    /// its spawn base and starts a new game if they are wrong.
    pub fn load_session(&self) -> Result<Option<SessionSnapshot>, SaveError> {
        self.read(SESSION_FILE, |r| decode_session(r))
    }

    /// Read the leaderboard file. `Ok(None)` if there is none.
    pub fn load_leaderboard(&self) -> Result<Option<Leaderboard>, SaveError> {
        self.read(LEADERBOARD_FILE, |r| decode_leaderboard(r))
    }

    /// Write the session file.
    pub fn write_session(&self, snapshot: &SessionSnapshot) -> Result<(), SaveError> {
        let mut buf = Vec::new();
        encode_session(&mut buf, snapshot)?;
        self.write_atomic(SESSION_FILE, &buf)
    }

    /// Write the in-memory leaderboard to disk.
    pub fn write_leaderboard(&self) -> Result<(), SaveError> {
        let mut buf = Vec::new();
        encode_leaderboard(&mut buf, &self.leaderboard)?;
        self.write_atomic(LEADERBOARD_FILE, &buf)
    }

    fn read<T>(
        &self,
        name: &str,
        decode: impl FnOnce(&mut dyn io::Read) -> Result<T, SaveError>,
    ) -> Result<Option<T>, SaveError> {
        let file = match fs::File::open(self.dir.join(name)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&mut BufReader::new(file)).map(Some)
    }

    fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(name);
        let tmp = self.dir.join(format!("{name}.tmp"));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    fn persist_leaderboard(&mut self) {
        if self.write_leaderboard().is_err() {
            self.failures += 1;
        }
    }
}

impl SaveSink for FileStore {
    fn save(&mut self, snapshot: &SessionSnapshot) {
        if self.write_session(snapshot).is_err() {
            self.failures += 1;
        }
    }
}

impl LeaderboardSink for FileStore {
    fn record_death(&mut self, highest_tile: u32, final_score: u64) {
        self.leaderboard.add_tile(highest_tile);
        self.leaderboard.add_score(final_score);
        self.persist_leaderboard();
    }

    fn record_win(&mut self, elapsed_ms: u64) {
        self.leaderboard.add_time(elapsed_ms);
        self.persist_leaderboard();
    }
}
