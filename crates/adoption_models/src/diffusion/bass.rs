//! Discrete-time Bass diffusion.
//!
//! The one-year adoption increment is:
//! ```text
//! growth = p * (m - a) + q * a * (m - a) / m      if a < m
//! growth = 0                                      if a >= m
//! ```
//! where:
//! - p = innovation coefficient (independent adopters)
//! - q = imitation coefficient (adopters influenced by existing adopters)
//! - m = market potential (adoption ceiling)
//! - a = current adoption
//!
//! For `p, q >= 0` and `0 <= a <= m <= 1` the increment is never negative.

use serde::Serialize;

/// One-year Bass adoption increment.
///
/// The caller guarantees `m > 0`; scenario resolution rejects
/// non-positive potentials before any path is evolved.
///
/// # Examples
///
/// ```rust
/// use adoption_models::diffusion::bass_increment;
///
/// // Pure innovation from zero adoption
/// assert!((bass_increment(0.1, 0.0, 0.5, 0.0) - 0.05).abs() < 1e-15);
///
/// // Saturated
/// assert_eq!(bass_increment(0.1, 0.4, 0.5, 0.5), 0.0);
/// ```
#[inline]
pub fn bass_increment(p: f64, q: f64, m: f64, a: f64) -> f64 {
    if a >= m {
        return 0.0;
    }
    let remaining = m - a;
    p * remaining + (q * a * remaining) / m
}

/// Scenario-adjusted Bass parameters of one segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BassDiffusion {
    /// Innovation coefficient `p`.
    pub innovation: f64,
    /// Imitation coefficient `q`.
    pub imitation: f64,
    /// Market potential `m` in (0, 1].
    pub potential: f64,
}

impl BassDiffusion {
    /// Creates a parameter triple.
    pub fn new(innovation: f64, imitation: f64, potential: f64) -> Self {
        Self {
            innovation,
            imitation,
            potential,
        }
    }

    /// Adoption increment from the current level.
    #[inline]
    pub fn increment(&self, adoption: f64) -> f64 {
        bass_increment(self.innovation, self.imitation, self.potential, adoption)
    }

    /// Next-year adoption under a multiplicative shock.
    ///
    /// The shock scales the increment, not the level, and the result is
    /// capped at the potential.
    #[inline]
    pub fn step(&self, adoption: f64, shock: f64) -> f64 {
        (adoption + self.increment(adoption) * shock).min(self.potential)
    }
}
