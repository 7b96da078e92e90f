//! Seeded pseudo-random number generator for shock generation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Per-path random number generator.
///
/// Wraps [`StdRng`] seeded from a single `u64`. Each simulation path owns
/// one instance; instances are never shared between paths.
///
/// # Examples
///
/// ```rust
/// use adoption_engine::rng::PathRng;
///
/// let mut a = PathRng::from_seed(7);
/// let mut b = PathRng::from_seed(7);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
pub struct PathRng {
    inner: StdRng,
    seed: u64,
}

impl PathRng {
    /// Creates a generator initialised with `seed`.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a standard normal variate.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills `buffer` with standard normal variates.
    ///
    /// Empty buffers are a no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
