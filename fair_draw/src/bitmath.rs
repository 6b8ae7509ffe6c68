// 64-bit wraparound arithmetic.
//
// Every value in the seed pipeline lives modulo 2^64. Products are formed in
// `u128` and folded back with `wrap64`, so the truncation point is explicit at
// each multiply instead of hidden in an overflow flag.

/// Reduce `x` to its low 64 bits.
#[inline]
pub const fn wrap64(x: u128) -> u64 {
    x as u64
}

/// `(a * b) mod 2^64`.
#[inline]
pub const fn mul64(a: u64, b: u64) -> u64 {
    wrap64(a as u128 * b as u128)
}

/// `(base ^ exponent) mod 2^64` by square-and-multiply.
///
/// O(log exponent) multiplies, each reduced through `wrap64`. `exponent == 0`
/// yields 1 for every base, including 0.
pub fn power64(base: u64, exponent: u64) -> u64 {
    let mut result = 1u64;
    let mut x = base;
    let mut k = exponent;
    while k != 0 {
        if k & 1 == 1 {
            result = mul64(result, x);
        }
        x = mul64(x, x);
        k >>= 1;
    }
    result
}
