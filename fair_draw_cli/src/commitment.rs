// Random commitment text.
//
// Organizers who have no natural label can generate one here, publish its
// digest, and later reveal it as the draw text. This is the only
// non-deterministic code in the workspace, and its output only ever feeds a
// draw as an ordinary text label.

use fair_draw::DrawError;
use rand::Rng;

/// The 62 symbols a commitment is drawn from, in this order.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A random string of `length` symbols from `ALPHABET`.
///
/// Fails with `InvalidRange` if `length` is 0.
pub fn random_text<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Result<String, DrawError> {
    if length == 0 {
        return Err(DrawError::InvalidRange(
            "commitment length must be at least 1".into(),
        ));
    }
    Ok((0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect())
}
