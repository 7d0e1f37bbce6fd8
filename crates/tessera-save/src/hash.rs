//! FNV-1a checksums over decoded payloads.
//!
//! Not cryptographic. They catch truncation and bit rot, nothing more.

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Checksum of a session payload.
///
/// The cell count is folded in first so a truncated cell list cannot
/// collide with a shorter valid one.
pub fn session_hash(cells: &[u32], score: u64, elapsed_ms: u64) -> u64 {
    let mut hash = fnv1a_u32(FNV_OFFSET, cells.len() as u32);
    for &v in cells {
        hash = fnv1a_u32(hash, v);
    }
    hash = fnv1a_u64(hash, score);
    fnv1a_u64(hash, elapsed_ms)
}

/// Checksum of a leaderboard payload.
///
/// Each list's length is folded in at its boundary so entries cannot
/// migrate between lists unnoticed.
pub fn leaderboard_hash(tiles: &[u32], scores: &[u64], times: &[u64]) -> u64 {
    let mut hash = fnv1a_u32(FNV_OFFSET, tiles.len() as u32);
    for &v in tiles {
        hash = fnv1a_u32(hash, v);
    }
    hash = fnv1a_u32(hash, scores.len() as u32);
    for &v in scores {
        hash = fnv1a_u64(hash, v);
    }
    hash = fnv1a_u32(hash, times.len() as u32);
    for &v in times {
        hash = fnv1a_u64(hash, v);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_payload_same_hash() {
        let cells = [32, 0, 64, 0];
        assert_eq!(session_hash(&cells, 10, 20), session_hash(&cells, 10, 20));
    }

    #[test]
    fn any_field_changes_hash() {
        let base = session_hash(&[32, 64], 10, 20);
        assert_ne!(base, session_hash(&[64, 32], 10, 20));
        assert_ne!(base, session_hash(&[32, 64], 11, 20));
        assert_ne!(base, session_hash(&[32, 64], 10, 21));
    }

    #[test]
    fn list_boundaries_matter() {
        assert_ne!(
            leaderboard_hash(&[], &[5], &[]),
            leaderboard_hash(&[], &[], &[5])
        );
    }

    #[test]
    fn matches_published_vector() {
        // FNV-1a 64 of "a".
        assert_eq!(fnv1a_byte(FNV_OFFSET, b'a'), 0xaf63dc4c8601ec8c);
    }
}
