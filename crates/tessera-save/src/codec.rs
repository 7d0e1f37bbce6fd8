//! Binary encode/decode for save records.
//!
//! All integers are little-endian. Lists are prefixed with a `u32`
//! count. Every record ends with an FNV-1a checksum of its payload.

use std::io::{Read, Write};

use tessera_core::{SessionSnapshot, CELL_COUNT};

use crate::error::SaveError;
use crate::hash::{leaderboard_hash, session_hash};
use crate::leaderboard::{Leaderboard, LEADERBOARD_SIZE};
use crate::{FORMAT_VERSION, KIND_LEADERBOARD, KIND_SESSION, MAGIC};

/// Longest cell list a reader will allocate for. Anything above this
/// is treated as corruption rather than a larger board.
const MAX_CELLS: usize = 4 * CELL_COUNT;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), SaveError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), SaveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), SaveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, SaveError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, SaveError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, SaveError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_count(r: &mut dyn Read, limit: usize, what: &str) -> Result<usize, SaveError> {
    let count = read_u32_le(r)? as usize;
    if count > limit {
        return Err(SaveError::Malformed {
            detail: format!("{what} count {count} exceeds limit {limit}"),
        });
    }
    Ok(count)
}

fn verify(stored: u64, computed: u64) -> Result<(), SaveError> {
    if stored != computed {
        return Err(SaveError::ChecksumMismatch { stored, computed });
    }
    Ok(())
}

// ── Header encode/decode ────────────────────────────────────────

/// Write magic, version and record kind.
pub fn encode_header(w: &mut dyn Write, kind: u8) -> Result<(), SaveError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_u8(w, kind)?;
    Ok(())
}

/// Read and validate magic, version and record kind.
pub fn decode_header(r: &mut dyn Read, expected_kind: u8) -> Result<(), SaveError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(SaveError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion { found: version });
    }

    let kind = read_u8(r)?;
    if kind != expected_kind {
        return Err(SaveError::Malformed {
            detail: format!("record kind {kind}, expected {expected_kind}"),
        });
    }
    Ok(())
}

// ── Session ─────────────────────────────────────────────────────

/// Encode a full session record.
pub fn encode_session(w: &mut dyn Write, snapshot: &SessionSnapshot) -> Result<(), SaveError> {
    encode_header(w, KIND_SESSION)?;
    write_u32_le(w, snapshot.cells.len() as u32)?;
    for &v in &snapshot.cells {
        write_u32_le(w, v)?;
    }
    write_u64_le(w, snapshot.score)?;
    write_u64_le(w, snapshot.elapsed_ms)?;
    write_u64_le(
        w,
        session_hash(&snapshot.cells, snapshot.score, snapshot.elapsed_ms),
    )?;
    Ok(())
}

/// Decode a full session record.
///
/// The checksum is verified before the cell list is shaped into a
/// [`SessionSnapshot`], so a wrong cell count in an intact file is
/// reported as [`SaveError::Load`]. Tile values are not checked here.
pub fn decode_session(r: &mut dyn Read) -> Result<SessionSnapshot, SaveError> {
    decode_header(r, KIND_SESSION)?;
    let count = read_count(r, MAX_CELLS, "cell")?;
    let mut cells = Vec::with_capacity(count);
    for _ in 0..count {
        cells.push(read_u32_le(r)?);
    }
    let score = read_u64_le(r)?;
    let elapsed_ms = read_u64_le(r)?;
    let stored = read_u64_le(r)?;
    verify(stored, session_hash(&cells, score, elapsed_ms))?;
    Ok(SessionSnapshot::from_cells(&cells, score, elapsed_ms)?)
}

// ── Leaderboard ─────────────────────────────────────────────────

/// Encode a full leaderboard record.
pub fn encode_leaderboard(w: &mut dyn Write, board: &Leaderboard) -> Result<(), SaveError> {
    encode_header(w, KIND_LEADERBOARD)?;
    write_u32_le(w, board.tiles().len() as u32)?;
    for &v in board.tiles() {
        write_u32_le(w, v)?;
    }
    write_u32_le(w, board.scores().len() as u32)?;
    for &v in board.scores() {
        write_u64_le(w, v)?;
    }
    write_u32_le(w, board.times().len() as u32)?;
    for &v in board.times() {
        write_u64_le(w, v)?;
    }
    write_u64_le(
        w,
        leaderboard_hash(board.tiles(), board.scores(), board.times()),
    )?;
    Ok(())
}

/// Decode a full leaderboard record.
pub fn decode_leaderboard(r: &mut dyn Read) -> Result<Leaderboard, SaveError> {
    decode_header(r, KIND_LEADERBOARD)?;

    let count = read_count(r, LEADERBOARD_SIZE, "tile")?;
    let mut tiles = Vec::with_capacity(count);
    for _ in 0..count {
        tiles.push(read_u32_le(r)?);
    }
    let count = read_count(r, LEADERBOARD_SIZE, "score")?;
    let mut scores = Vec::with_capacity(count);
    for _ in 0..count {
        scores.push(read_u64_le(r)?);
    }
    let count = read_count(r, LEADERBOARD_SIZE, "time")?;
    let mut times = Vec::with_capacity(count);
    for _ in 0..count {
        times.push(read_u64_le(r)?);
    }

    let stored = read_u64_le(r)?;
    verify(stored, leaderboard_hash(&tiles, &scores, &times))?;
    Ok(Leaderboard::from_parts(tiles, scores, times))
}
