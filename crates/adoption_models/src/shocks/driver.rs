//! Shock driver registry and AR(1) combination.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AR(1) weight on the previous year's driver shock.
pub const AR_PERSISTENCE: f64 = 0.7;

/// AR(1) weight on the current year's innovation.
pub const AR_INNOVATION_WEIGHT: f64 = 0.3;

/// Errors raised while validating a [`ShockRegistry`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RegistryError {
    /// The registry has no drivers.
    #[error("Shock registry is empty")]
    Empty,

    /// A driver weight lies outside [0, 1].
    #[error("Driver '{name}' has weight {weight}: must be in [0, 1]")]
    InvalidWeight {
        /// Driver name.
        name: String,
        /// Offending weight.
        weight: f64,
    },

    /// A driver volatility is negative or not finite.
    #[error("Driver '{name}' has volatility {volatility}: must be finite and non-negative")]
    InvalidVolatility {
        /// Driver name.
        name: String,
        /// Offending volatility.
        volatility: f64,
    },
}

/// One stochastic market driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShockDriver {
    /// Driver name.
    pub name: String,
    /// Weight in the combined log-shock.
    pub weight: f64,
    /// Standard deviation of the driver innovations.
    pub volatility: f64,
}

impl ShockDriver {
    /// Creates a driver.
    pub fn new(name: impl Into<String>, weight: f64, volatility: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            volatility,
        }
    }
}

/// Fixed set of shock drivers.
///
/// The default registry holds five macro drivers whose weights sum to 1:
///
/// | driver | weight | volatility |
/// |--------|--------|------------|
/// | demographic_pressure | 0.25 | 0.10 |
/// | technology_advancement | 0.30 | 0.20 |
/// | economic_conditions | 0.20 | 0.25 |
/// | government_policy | 0.15 | 0.15 |
/// | competitive_pressure | 0.10 | 0.18 |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShockRegistry {
    drivers: Vec<ShockDriver>,
}

impl Default for ShockRegistry {
    fn default() -> Self {
        Self {
            drivers: vec![
                ShockDriver::new("demographic_pressure", 0.25, 0.10),
                ShockDriver::new("technology_advancement", 0.30, 0.20),
                ShockDriver::new("economic_conditions", 0.20, 0.25),
                ShockDriver::new("government_policy", 0.15, 0.15),
                ShockDriver::new("competitive_pressure", 0.10, 0.18),
            ],
        }
    }
}

impl ShockRegistry {
    /// Creates a validated registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the list is empty, a weight is outside
    /// [0, 1], or a volatility is negative or not finite.
    pub fn new(drivers: Vec<ShockDriver>) -> Result<Self, RegistryError> {
        let registry = Self { drivers };
        registry.validate()?;
        Ok(registry)
    }

    /// Validates every driver.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.drivers.is_empty() {
            return Err(RegistryError::Empty);
        }
        for driver in &self.drivers {
            if !(0.0..=1.0).contains(&driver.weight) {
                return Err(RegistryError::InvalidWeight {
                    name: driver.name.clone(),
                    weight: driver.weight,
                });
            }
            if !driver.volatility.is_finite() || driver.volatility < 0.0 {
                return Err(RegistryError::InvalidVolatility {
                    name: driver.name.clone(),
                    volatility: driver.volatility,
                });
            }
        }
        Ok(())
    }

    /// Registered drivers.
    #[inline]
    pub fn drivers(&self) -> &[ShockDriver] {
        &self.drivers
    }

    /// Number of drivers.
    #[inline]
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Whether the registry has no drivers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Copy of the registry with every volatility multiplied by `scale`.
    ///
    /// A negative or non-finite scale is treated as zero.
    pub fn scaled(&self, scale: f64) -> Self {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        Self {
            drivers: self
                .drivers
                .iter()
                .map(|d| ShockDriver::new(d.name.clone(), d.weight, d.volatility * scale))
                .collect(),
        }
    }

    /// Combines driver innovations into multiplicative shock factors.
    ///
    /// `innovations` is driver-major: `innovations[d * n_years + t]` is the
    /// innovation of driver `d` in year `t`, already scaled to the driver's
    /// volatility. `out` receives one factor per year.
    ///
    /// # Panics
    ///
    /// Panics if `innovations.len() != self.len() * out.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adoption_models::shocks::ShockRegistry;
    ///
    /// let registry = ShockRegistry::default();
    /// let innovations = vec![0.0; registry.len() * 3];
    /// let mut shocks = vec![0.0; 3];
    /// registry.combine_into(&innovations, &mut shocks);
    /// assert_eq!(shocks, vec![1.0, 1.0, 1.0]);
    /// ```
    pub fn combine_into(&self, innovations: &[f64], out: &mut [f64]) {
        let n_years = out.len();
        assert_eq!(
            innovations.len(),
            self.drivers.len() * n_years,
            "innovation buffer does not match registry size"
        );

        out.fill(0.0);
        if n_years == 0 {
            return;
        }

        let mut filtered = vec![0.0; n_years];
        for (driver, driver_innovations) in self
            .drivers
            .iter()
            .zip(innovations.chunks_exact(n_years))
        {
            ar1_filter(driver_innovations, &mut filtered);
            for (log_shock, x) in out.iter_mut().zip(&filtered) {
                *log_shock += driver.weight * x;
            }
        }

        for log_shock in out.iter_mut() {
            *log_shock = log_shock.exp();
        }
    }

    /// Allocating form of [`combine_into`](Self::combine_into).
    pub fn combine(&self, innovations: &[f64], n_years: usize) -> Vec<f64> {
        let mut out = vec![0.0; n_years];
        self.combine_into(innovations, &mut out);
        out
    }
}

/// AR(1) filter: `out[0] = e[0]`, `out[t] = 0.7 * out[t-1] + 0.3 * e[t]`.
///
/// The root 0.7 keeps the process stationary.
///
/// # Panics
///
/// Panics if the slices differ in length.
#[inline]
pub fn ar1_filter(innovations: &[f64], out: &mut [f64]) {
    assert_eq!(innovations.len(), out.len());
    let mut previous = 0.0;
    for (t, (x, &e)) in out.iter_mut().zip(innovations).enumerate() {
        *x = if t == 0 {
            e
        } else {
            AR_PERSISTENCE * previous + AR_INNOVATION_WEIGHT * e
        };
        previous = *x;
    }
}
