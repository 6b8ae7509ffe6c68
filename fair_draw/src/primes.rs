// First-N prime generation.
//
// Two phases. A linear sieve runs up to an estimated bound
// `round(n * ln(n) * 1.5)` and returns as soon as `n` primes are collected.
// If the estimate undershoots (it does for small `n`: the bound is 0 for
// n == 1 and 2 for n == 2), trial division by the primes already found
// extends the list one candidate at a time. The estimate only decides how
// much work the sieve does; the trial-division phase is what guarantees the
// result, so the float in the estimate cannot affect the output.

/// Upper bound handed to the sieve for `count` primes.
pub fn sieve_limit(count: usize) -> usize {
    if count <= 1 {
        return 0;
    }
    let n = count as f64;
    (n * n.ln() * 1.5).round() as usize
}

/// The first `count` primes in ascending order. `count == 0` yields an empty
/// vector.
pub fn first_primes(count: usize) -> Vec<u64> {
    if count == 0 {
        return Vec::new();
    }
    let max = sieve_limit(count);
    let mut primes: Vec<u64> = Vec::with_capacity(count);
    let mut composite = vec![false; max + 1];

    for x in 2..=max {
        if !composite[x] {
            primes.push(x as u64);
            if primes.len() == count {
                return primes;
            }
        }
        // Linear sieve: strike x * p for every prime p up to the smallest
        // prime factor of x, so each composite is struck exactly once.
        for &p in &primes {
            let p = p as usize;
            if p > max / x {
                break;
            }
            composite[x * p] = true;
            if x % p == 0 {
                break;
            }
        }
    }

    tracing::trace!(
        count,
        max,
        found = primes.len(),
        "prime sieve bound undershot; extending by trial division"
    );
    let mut candidate = max as u64;
    while primes.len() < count {
        candidate += 1;
        if is_prime_by(&primes, candidate) {
            primes.push(candidate);
        }
    }
    primes
}

/// Trial division by the ascending `primes`, which must include every prime
/// up to `sqrt(candidate)`.
fn is_prime_by(primes: &[u64], candidate: u64) -> bool {
    if candidate < 2 {
        return false;
    }
    for &p in primes {
        if p > candidate / p {
            break;
        }
        if candidate % p == 0 {
            return false;
        }
    }
    true
}
