use rand::Rng;

use crate::charset::ResolvedCharset;

/// Generate a random identifier of exactly `length` characters.
///
/// Each character is drawn independently and uniformly from `charset`, with
/// replacement.
pub fn generate_id(charset: &ResolvedCharset, length: usize) -> String {
    generate_id_with(&mut rand::thread_rng(), charset, length)
}

/// [`generate_id`] with a caller-supplied entropy source.
pub fn generate_id_with<R: Rng + ?Sized>(
    rng: &mut R,
    charset: &ResolvedCharset,
    length: usize,
) -> String {
    let chars = charset.as_slice();
    (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())])
        .collect()
}
