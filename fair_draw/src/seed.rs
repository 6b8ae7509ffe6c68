// Prime-power seed encoding.
//
// Folds an ordered array of non-negative integers into one 64-bit seed: the
// i-th value becomes the exponent of the i-th odd prime (3, 5, 7, ...) and
// the powers are multiplied together modulo 2^64. Position matters because
// each position has its own base, in the spirit of a Gödel numbering.
//
// The prime 2 is skipped: its powers collapse to 0 mod 2^64 once the
// exponent reaches 64, which would erase every other contribution.
//
// This is best-effort mixing, not a commitment scheme. Collisions exist
// because the result is truncated to 64 bits.

use crate::bitmath::{mul64, power64};
use crate::error::{DrawError, Result};
use crate::primes::first_primes;

/// The first `len` odd primes, i.e. `first_primes(len + 1)` without the 2.
///
/// Recomputed on every call; nothing is cached between encodings.
pub fn encoding_primes(len: usize) -> Vec<u64> {
    let mut primes = first_primes(len + 1);
    primes.remove(0);
    primes
}

/// Encode `values` as `prod(p_i ^ values[i]) mod 2^64` over the odd primes.
///
/// Fails with `InvalidRange` on an empty array. The result is always odd.
pub fn encode_seed(values: &[u64]) -> Result<u64> {
    if values.is_empty() {
        return Err(DrawError::InvalidRange(
            "seed encoding needs a non-empty array".into(),
        ));
    }
    let primes = encoding_primes(values.len());
    let seed = primes
        .iter()
        .zip(values)
        .fold(1u64, |acc, (&p, &v)| mul64(acc, power64(p, v)));
    Ok(seed)
}
