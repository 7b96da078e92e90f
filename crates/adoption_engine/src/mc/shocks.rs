//! Shock matrix generation.
//!
//! One multiplicative shock factor per (path, year). Column `t - 1` drives
//! the transition from year `t - 1` to year `t`, so a horizon of `T` years
//! needs exactly `T` columns.

use adoption_models::shocks::ShockRegistry;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::EngineError;
use crate::rng::{derive_path_seed, PathRng};

/// Dense row-major `n_paths × n_years` matrix of shock factors.
///
/// # Examples
///
/// ```rust
/// use adoption_engine::mc::ShockMatrix;
///
/// let shocks = ShockMatrix::from_rows(vec![vec![1.0, 1.1], vec![0.9, 1.0]]).unwrap();
/// assert_eq!(shocks.n_paths(), 2);
/// assert_eq!(shocks.n_years(), 2);
/// assert_eq!(shocks.get(1, 0), 0.9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShockMatrix {
    data: Vec<f64>,
    n_paths: usize,
    n_years: usize,
}

impl ShockMatrix {
    /// Matrix with every factor equal to `value`.
    ///
    /// `constant(n, t, 1.0)` is the degenerate stream with zero log-shock.
    pub fn constant(n_paths: usize, n_years: usize, value: f64) -> Self {
        Self {
            data: vec![value; n_paths * n_years],
            n_paths,
            n_years,
        }
    }

    /// Builds a matrix from per-path rows.
    ///
    /// # Errors
    ///
    /// - `ShockShape` if the rows differ in length
    /// - `InvalidShock` if a factor is negative or not finite
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, EngineError> {
        let n_paths = rows.len();
        let n_years = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_paths * n_years);
        for (path, row) in rows.into_iter().enumerate() {
            if row.len() != n_years {
                return Err(EngineError::ShockShape {
                    expected: n_years,
                    found: row.len(),
                });
            }
            for (year, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(EngineError::InvalidShock { path, year, value });
                }
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            n_paths,
            n_years,
        })
    }

    /// Generates the shock matrix of one scenario.
    ///
    /// Each path draws driver-major innovations (all years of driver 0, then
    /// driver 1, ...) from its own [`PathRng`] seeded by
    /// [`derive_path_seed`]`(base_seed, scenario_tag, path)`, scales them by
    /// the driver volatilities and combines them through
    /// [`ShockRegistry::combine_into`]. Rows are filled in parallel when
    /// `parallel` is set; the result does not depend on it.
    pub fn generate(
        registry: &ShockRegistry,
        n_paths: usize,
        n_years: usize,
        base_seed: u64,
        scenario_tag: u64,
        parallel: bool,
    ) -> Self {
        let mut data = vec![0.0; n_paths * n_years];
        if n_years > 0 {
            let fill_row = |(path, row): (usize, &mut [f64])| {
                let seed = derive_path_seed(base_seed, scenario_tag, path);
                fill_path(registry, seed, row);
            };
            if parallel {
                data.par_chunks_mut(n_years).enumerate().for_each(fill_row);
            } else {
                data.chunks_mut(n_years).enumerate().for_each(fill_row);
            }
        }
        Self {
            data,
            n_paths,
            n_years,
        }
    }

    /// Number of paths (rows).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of years (columns).
    #[inline]
    pub fn n_years(&self) -> usize {
        self.n_years
    }

    /// Shock factors of one path.
    ///
    /// # Panics
    ///
    /// Panics if `path >= n_paths`.
    #[inline]
    pub fn row(&self, path: usize) -> &[f64] {
        let start = path * self.n_years;
        &self.data[start..start + self.n_years]
    }

    /// Shock factor of one path and year.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of range.
    #[inline]
    pub fn get(&self, path: usize, year: usize) -> f64 {
        self.row(path)[year]
    }

    /// Iterates over path rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics
        self.data.chunks_exact(self.n_years.max(1)).take(self.n_paths)
    }
}

fn fill_path(registry: &ShockRegistry, seed: u64, row: &mut [f64]) {
    let n_years = row.len();
    let mut rng = PathRng::from_seed(seed);
    let mut innovations = vec![0.0; registry.len() * n_years];
    rng.fill_normal(&mut innovations);
    for (driver, chunk) in registry
        .drivers()
        .iter()
        .zip(innovations.chunks_exact_mut(n_years))
    {
        for z in chunk.iter_mut() {
            *z *= driver.volatility;
        }
    }
    registry.combine_into(&innovations, row);
}
