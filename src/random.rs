//! Uniform sources feeding the normal-variate generators.
//!
//! Every generator in this crate is generic over [`rand::Rng`]. The two
//! capabilities it draws on are a uniform `f64` in `[0, 1)`
//! (`rng.random::<f64>()`) and a uniform `u32` (`rng.next_u32()`).
//! Seeding is the caller's job; [`create_rng`] is provided for
//! reproducible tests and benchmarks.
//!
//! # Reproducibility
//!
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
///
/// # Examples
/// ```
/// use descstats::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Returns a value uniformly drawn from `(-1, 1)`, never exactly zero.
///
/// Zero draws are rejected and redrawn, so the result is safe to use as
/// a coordinate whose squared norm is later divided by.
///
/// # Examples
/// ```
/// use descstats::random::{create_rng, uniform_signed};
/// let mut rng = create_rng(7);
/// let v = uniform_signed(&mut rng);
/// assert!(v > -1.0 && v < 1.0 && v != 0.0);
/// ```
pub fn uniform_signed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let v = 2.0 * rng.random::<f64>() - 1.0;
        if v != 0.0 {
            return v;
        }
    }
}

/// Returns a value uniformly drawn from `(0, 1]`.
///
/// Computed as `1 − u` for `u ∈ [0, 1)`, so the logarithm of the result
/// is always finite.
pub fn uniform_open<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    1.0 - rng.random::<f64>()
}

// ============================================================================
// Tests
// ============================================================================
