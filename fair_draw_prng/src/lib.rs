// Deterministic, portable 64-bit xorshift stream.
//
// Implements one xorshift round with the shift triple (32, 13, 1): left 32,
// right 13, left 1. Hand-rolled with zero external RNG dependencies so that
// the output is identical on every platform, compiler version, and
// optimization level.
//
// This crate is the single PRNG used by Fair Draw. `fair_draw` threads the
// seed derived from a draw's inputs through `Xorshift64`, and every published
// draw must be reproducible by anyone re-running the same inputs. The shift
// triple is therefore frozen: changing it would silently change historical
// results.
//
// **Critical constraint: determinism.** `xorshift64_step` must produce
// identical output for identical input. Do not use floating-point arithmetic,
// stdlib PRNG, or any source of non-determinism in this module.
//
// Known limitation: no full-period guarantee is claimed for this triple.
// Zero is a fixed point (step(0) == 0). Seeds derived by `fair_draw` are
// products of odd prime powers and are therefore always odd.

use serde::{Deserialize, Serialize};

/// Left shift applied first in each round.
pub const SHIFT_A: u32 = 32;
/// Logical right shift applied second.
pub const SHIFT_B: u32 = 13;
/// Left shift applied last.
pub const SHIFT_C: u32 = 1;

/// Advance a seed by one xorshift round and return the new seed.
///
/// Pure function: the caller threads the seed explicitly. Left shifts drop
/// the bits that leave the 64-bit width; the right shift is logical.
pub const fn xorshift64_step(seed: u64) -> u64 {
    let mut s = seed;
    s ^= s << SHIFT_A;
    s ^= s >> SHIFT_B;
    s ^= s << SHIFT_C;
    s
}

/// A xorshift64 stream as a plain value.
///
/// Owns only the current seed. Two streams created from the same seed yield
/// identical sequences, and a stream can be serialized mid-sequence and
/// resumed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Create a stream positioned at `seed` (iteration 0).
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Apply one step and return the post-step seed.
    pub fn next_u64(&mut self) -> u64 {
        self.state = xorshift64_step(self.state);
        self.state
    }
}

impl Iterator for Xorshift64 {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.next_u64())
    }
}
