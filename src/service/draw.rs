//! Uniform without-replacement winner selection.

use rand::seq::SliceRandom;
use rand::Rng;

/// Draws up to `count` distinct elements uniformly from `pool`.
///
/// Shuffle-and-take: the pool is copied, Fisher-Yates shuffled with the
/// supplied rng, and truncated. The caller's slice is never mutated. When
/// `count >= pool.len()` the whole pool is returned in shuffled order.
///
/// The rng is injected so tests can use a seeded generator; production
/// callers pass `rand::rng()`. The draw is fair, not cryptographically
/// secure.
pub fn sample<T, R>(rng: &mut R, pool: &[T], count: usize) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut drawn = pool.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(count.min(drawn.len()));
    drawn
}
