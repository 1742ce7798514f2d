//! Unbiased Fisher-Yates shuffling over an injected random source.

use rand::Rng;

/// Return a new vector holding `items` in uniformly random order.
///
/// The input is left untouched. Pass a seeded `StdRng` for reproducible
/// output.
pub fn shuffle<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}
