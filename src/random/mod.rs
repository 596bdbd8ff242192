//! Weighted coin flips with an injectable randomness source.

use rand::Rng;

/// A generator of uniformly distributed values in `[0, 1)`.
///
/// Implemented for closures so tests can substitute fixed draws:
///
/// ```
/// use fetch_utils::random_boolean_with_set_chance_from;
///
/// let mut source = || 0.4;
/// assert!(random_boolean_with_set_chance_from(&mut source, 50.0));
/// ```
pub trait RandomSource {
    /// Returns the next draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Returns `true` with roughly `percent_chance` percent probability.
///
/// Uses the thread-local generator. See [`random_boolean_with_set_chance_from`]
/// for the exact rule.
pub fn random_boolean_with_set_chance(percent_chance: f64) -> bool {
    random_boolean_with_set_chance_from(&mut RngSource(rand::thread_rng()), percent_chance)
}

/// Draws a value in `[0, 100)` from `source` and returns whether it is strictly
/// below `percent_chance`.
///
/// A chance of 0 or less is always `false`, 100 or more is always `true`, and
/// NaN is always `false`.
pub fn random_boolean_with_set_chance_from<S>(source: &mut S, percent_chance: f64) -> bool
where
    S: RandomSource + ?Sized,
{
    let draw = source.next_unit() * 100.0;
    draw < percent_chance
}
