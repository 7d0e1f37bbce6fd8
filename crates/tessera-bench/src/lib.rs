//! Benchmark profiles for the Tessera tile-merge engine.
//!
//! Provides deterministic inputs for benchmarks and soak runs:
//!
//! - [`reference_config`]: default engine config with a fixed seed
//! - [`scripted_moves`]: a seeded direction sequence
//! - [`midgame_snapshot`]: a board reached by replaying a script

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tessera_core::{Bests, Direction, SessionSnapshot};
use tessera_engine::{BoardEngine, EngineConfig};

/// Default engine configuration seeded with `seed`.
pub fn reference_config(seed: u64) -> EngineConfig {
    EngineConfig {
        seed,
        ..EngineConfig::default()
    }
}

/// `count` directions drawn uniformly from a generator seeded with `seed`.
pub fn scripted_moves(count: usize, seed: u64) -> Vec<Direction> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| Direction::ALL[rng.random_range(0..Direction::ALL.len())])
        .collect()
}

/// Play up to `moves` scripted commands on a fresh board and return
/// where it ended up.
///
/// Stops early if the session ends, so the result is always a board a
/// benchmark can keep moving on unless the script itself ran it out.
pub fn midgame_snapshot(moves: usize, seed: u64) -> SessionSnapshot {
    let mut engine = BoardEngine::new(reference_config(seed), None, Bests::default())
        .expect("reference config is valid");
    for dir in scripted_moves(moves, seed) {
        engine.submit(dir);
        engine.update(0);
        if engine.state().is_terminal() {
            break;
        }
    }
    engine.snapshot()
}
