//! Simulation parameter set.
//!
//! [`ParameterSet`] is the immutable configuration of one analysis run:
//! horizon, path count, initial conditions and baseline rates. It is
//! constructed through [`ParameterSetBuilder`], which validates every field
//! at build time so that an invalid configuration never reaches the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::ParameterError;
use super::segment::Segment;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum simulation horizon in years.
pub const MAX_TIME_HORIZON: usize = 1_000;

/// Volatility at which the default shock driver registry is specified.
///
/// The effective driver volatilities are scaled by
/// `volatility / REFERENCE_VOLATILITY`.
pub const REFERENCE_VOLATILITY: f64 = 0.15;

/// Tolerance used when checking that segment weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Base Bass diffusion coefficients before scenario adjustment.
///
/// # Examples
///
/// ```rust
/// use adoption_core::types::BassCoefficients;
///
/// let bass = BassCoefficients::default();
/// assert_eq!(bass.innovation, 0.03);
/// assert_eq!(bass.imitation, 0.38);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BassCoefficients {
    /// Innovation coefficient `p` (independent adopters).
    pub innovation: f64,
    /// Imitation coefficient `q` (adopters influenced by existing adopters).
    pub imitation: f64,
}

impl BassCoefficients {
    /// Creates a coefficient pair.
    pub fn new(innovation: f64, imitation: f64) -> Self {
        Self {
            innovation,
            imitation,
        }
    }

    fn validate(&self) -> Result<(), ParameterError> {
        for (name, value) in [("innovation", self.innovation), ("imitation", self.imitation)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParameterError::InvalidCoefficient { name, value });
            }
        }
        Ok(())
    }
}

impl Default for BassCoefficients {
    fn default() -> Self {
        Self {
            innovation: 0.03,
            imitation: 0.38,
        }
    }
}

/// Population shares used to blend segment adoption into overall adoption.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentWeights {
    /// Share of SMEs in the population.
    pub sme: f64,
    /// Share of large enterprises in the population.
    pub large: f64,
}

impl SegmentWeights {
    /// Creates a weight pair.
    pub fn new(sme: f64, large: f64) -> Self {
        Self { sme, large }
    }

    /// Weight of a single segment.
    #[inline]
    pub fn weight(&self, segment: Segment) -> f64 {
        match segment {
            Segment::Sme => self.sme,
            Segment::Large => self.large,
        }
    }

    /// Weighted blend of per-segment values indexed by [`Segment::index`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adoption_core::types::SegmentWeights;
    ///
    /// let weights = SegmentWeights::default();
    /// let overall = weights.blend(&[0.2, 0.5]);
    /// assert!((overall - 0.29).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn blend(&self, values: &[f64; Segment::COUNT]) -> f64 {
        Segment::ALL
            .iter()
            .map(|&segment| self.weight(segment) * values[segment.index()])
            .sum()
    }

    fn validate(&self) -> Result<(), ParameterError> {
        let valid = self.sme.is_finite()
            && self.large.is_finite()
            && self.sme >= 0.0
            && self.large >= 0.0
            && ((self.sme + self.large) - 1.0).abs() <= WEIGHT_SUM_TOLERANCE;
        if valid {
            Ok(())
        } else {
            Err(ParameterError::InvalidSegmentWeights {
                sme: self.sme,
                large: self.large,
            })
        }
    }
}

impl Default for SegmentWeights {
    fn default() -> Self {
        Self {
            sme: 0.7,
            large: 0.3,
        }
    }
}

/// Immutable configuration of one analysis run.
///
/// Use [`ParameterSet::builder`] to construct instances; the builder starts
/// from the reference study values and validates on [`build`](ParameterSetBuilder::build).
///
/// # Examples
///
/// ```rust
/// use adoption_core::types::{ParameterSet, Segment};
///
/// let params = ParameterSet::builder()
///     .num_paths(2_000)
///     .initial_market_size(10.0)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.num_paths(), 2_000);
/// assert_eq!(params.initial_adoption(Segment::Sme), 0.16);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParameterSet {
    time_horizon: usize,
    num_paths: usize,
    initial_market_size: f64,
    base_growth_rate: f64,
    initial_adoption_rates: BTreeMap<Segment, f64>,
    volatility: f64,
    bass: BassCoefficients,
    segment_weights: SegmentWeights,
}

impl ParameterSet {
    /// Creates a builder seeded with the reference study values.
    #[inline]
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::default()
    }

    /// Simulation horizon in years.
    #[inline]
    pub fn time_horizon(&self) -> usize {
        self.time_horizon
    }

    /// Number of Monte Carlo paths per scenario.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Market size at year 0.
    #[inline]
    pub fn initial_market_size(&self) -> f64 {
        self.initial_market_size
    }

    /// Deterministic annual market growth rate.
    #[inline]
    pub fn base_growth_rate(&self) -> f64 {
        self.base_growth_rate
    }

    /// Volatility level of the shock process.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Factor applied to every driver volatility of the shock registry.
    #[inline]
    pub fn volatility_scale(&self) -> f64 {
        self.volatility / REFERENCE_VOLATILITY
    }

    /// Base Bass coefficients.
    #[inline]
    pub fn bass(&self) -> BassCoefficients {
        self.bass
    }

    /// Population weights of the segments.
    #[inline]
    pub fn segment_weights(&self) -> SegmentWeights {
        self.segment_weights
    }

    /// Year-0 adoption rate of a segment.
    #[inline]
    pub fn initial_adoption(&self, segment: Segment) -> f64 {
        // Presence of every segment is checked in `validate`.
        self.initial_adoption_rates
            .get(&segment)
            .copied()
            .unwrap_or_default()
    }

    /// Year-0 adoption rates of all segments, indexed by [`Segment::index`].
    pub fn initial_segment_adoption(&self) -> [f64; Segment::COUNT] {
        Segment::ALL.map(|segment| self.initial_adoption(segment))
    }

    /// Year-0 overall adoption: the weighted blend of the segment rates.
    pub fn initial_overall_adoption(&self) -> f64 {
        self.segment_weights
            .blend(&self.initial_segment_adoption())
    }

    /// Validates the parameter set.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError` if:
    /// - `time_horizon` is 0 or greater than 1,000
    /// - `num_paths` is 0 or greater than 10,000,000
    /// - the market size is not finite and positive
    /// - the growth rate is not finite or is at or below -1
    /// - the volatility is negative or not finite
    /// - a segment rate is missing or lies outside [0, 1]
    /// - segment weights or Bass coefficients are invalid
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.time_horizon == 0 || self.time_horizon > MAX_TIME_HORIZON {
            return Err(ParameterError::InvalidTimeHorizon(self.time_horizon));
        }
        if self.num_paths == 0 || self.num_paths > MAX_PATHS {
            return Err(ParameterError::InvalidPathCount(self.num_paths));
        }
        if !self.initial_market_size.is_finite() || self.initial_market_size <= 0.0 {
            return Err(ParameterError::InvalidMarketSize(self.initial_market_size));
        }
        if !self.base_growth_rate.is_finite() || self.base_growth_rate <= -1.0 {
            return Err(ParameterError::InvalidGrowthRate(self.base_growth_rate));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(ParameterError::InvalidVolatility(self.volatility));
        }
        for segment in Segment::ALL {
            let rate = *self
                .initial_adoption_rates
                .get(&segment)
                .ok_or(ParameterError::MissingAdoptionRate(segment))?;
            check_rate(segment.name(), rate)?;
        }
        self.segment_weights.validate()?;
        self.bass.validate()?;
        Ok(())
    }
}

fn check_rate(group: &'static str, rate: f64) -> Result<(), ParameterError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(ParameterError::AdoptionRateOutOfRange { group, rate })
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        let builder = ParameterSetBuilder::default();
        Self {
            time_horizon: builder.time_horizon,
            num_paths: builder.num_paths,
            initial_market_size: builder.initial_market_size,
            base_growth_rate: builder.base_growth_rate,
            initial_adoption_rates: builder.initial_adoption_rates,
            volatility: builder.volatility,
            bass: builder.bass,
            segment_weights: builder.segment_weights,
        }
    }
}

/// Builder for [`ParameterSet`].
///
/// Starts from the reference study values (6 years, 1,000 paths, market size
/// 7.56, 23.3% growth, volatility 0.15, adoption sme 0.16 / large 0.42)
/// and validates at build time.
///
/// # Examples
///
/// ```rust
/// use adoption_core::types::{ParameterSet, Segment};
///
/// let params = ParameterSet::builder()
///     .time_horizon(1)
///     .num_paths(1)
///     .initial_market_size(10.0)
///     .base_growth_rate(0.0)
///     .volatility(0.0)
///     .adoption_rate(Segment::Sme, 0.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.volatility_scale(), 0.0);
/// assert!((params.initial_overall_adoption() - (0.7 * 0.5 + 0.3 * 0.42)).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct ParameterSetBuilder {
    time_horizon: usize,
    num_paths: usize,
    initial_market_size: f64,
    base_growth_rate: f64,
    initial_adoption_rates: BTreeMap<Segment, f64>,
    volatility: f64,
    bass: BassCoefficients,
    segment_weights: SegmentWeights,
}

impl Default for ParameterSetBuilder {
    fn default() -> Self {
        Self {
            time_horizon: 6,
            num_paths: 1_000,
            initial_market_size: 7.56,
            base_growth_rate: 0.233,
            initial_adoption_rates: BTreeMap::from([(Segment::Sme, 0.16), (Segment::Large, 0.42)]),
            volatility: REFERENCE_VOLATILITY,
            bass: BassCoefficients::default(),
            segment_weights: SegmentWeights::default(),
        }
    }
}

impl ParameterSetBuilder {
    /// Sets the horizon in years, in [1, 1_000].
    #[inline]
    pub fn time_horizon(mut self, years: usize) -> Self {
        self.time_horizon = years;
        self
    }

    /// Sets the number of paths, in [1, 10_000_000].
    #[inline]
    pub fn num_paths(mut self, n_paths: usize) -> Self {
        self.num_paths = n_paths;
        self
    }

    /// Sets the year-0 market size.
    #[inline]
    pub fn initial_market_size(mut self, size: f64) -> Self {
        self.initial_market_size = size;
        self
    }

    /// Sets the deterministic annual growth rate.
    #[inline]
    pub fn base_growth_rate(mut self, rate: f64) -> Self {
        self.base_growth_rate = rate;
        self
    }

    /// Sets the shock volatility level.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Sets the year-0 adoption rate of one segment.
    #[inline]
    pub fn adoption_rate(mut self, segment: Segment, rate: f64) -> Self {
        self.initial_adoption_rates.insert(segment, rate);
        self
    }

    /// Replaces the whole segment rate mapping.
    pub fn initial_adoption_rates(mut self, rates: BTreeMap<Segment, f64>) -> Self {
        self.initial_adoption_rates = rates;
        self
    }

    /// Sets the base Bass coefficients.
    #[inline]
    pub fn bass(mut self, bass: BassCoefficients) -> Self {
        self.bass = bass;
        self
    }

    /// Sets the segment population weights.
    #[inline]
    pub fn segment_weights(mut self, weights: SegmentWeights) -> Self {
        self.segment_weights = weights;
        self
    }

    /// Builds and validates the parameter set.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found by [`ParameterSet::validate`].
    pub fn build(self) -> Result<ParameterSet, ParameterError> {
        let params = ParameterSet {
            time_horizon: self.time_horizon,
            num_paths: self.num_paths,
            initial_market_size: self.initial_market_size,
            base_growth_rate: self.base_growth_rate,
            initial_adoption_rates: self.initial_adoption_rates,
            volatility: self.volatility,
            bass: self.bass,
            segment_weights: self.segment_weights,
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builder_defaults_are_valid() {
        let params = ParameterSet::builder().build().unwrap();
        assert_eq!(params, ParameterSet::default());
        assert_eq!(params.time_horizon(), 6);
        assert_eq!(params.num_paths(), 1_000);
        assert_relative_eq!(params.initial_market_size(), 7.56);
        assert_relative_eq!(params.volatility_scale(), 1.0);
    }

    #[test]
    fn test_overall_adoption_is_segment_blend() {
        let params = ParameterSet::builder().build().unwrap();
        assert_relative_eq!(params.initial_overall_adoption(), 0.7 * 0.16 + 0.3 * 0.42);

        let params = ParameterSet::builder()
            .adoption_rate(Segment::Sme, 0.5)
            .segment_weights(SegmentWeights::new(0.5, 0.5))
            .build()
            .unwrap();
        assert_relative_eq!(params.initial_overall_adoption(), 0.5 * 0.5 + 0.5 * 0.42);
    }

    #[test]
    fn test_invalid_zero_horizon() {
        let result = ParameterSet::builder().time_horizon(0).build();
        assert!(matches!(result, Err(ParameterError::InvalidTimeHorizon(0))));
    }

    #[test]
    fn test_invalid_horizon_too_long() {
        let result = ParameterSet::builder()
            .time_horizon(MAX_TIME_HORIZON + 1)
            .build();
        assert!(matches!(result, Err(ParameterError::InvalidTimeHorizon(_))));
    }

    #[test]
    fn test_invalid_zero_paths() {
        let result = ParameterSet::builder().num_paths(0).build();
        assert!(matches!(result, Err(ParameterError::InvalidPathCount(0))));
    }

    #[test]
    fn test_invalid_market_size() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = ParameterSet::builder().initial_market_size(size).build();
            assert!(matches!(result, Err(ParameterError::InvalidMarketSize(_))));
        }
    }

    #[test]
    fn test_invalid_growth_rate() {
        let result = ParameterSet::builder().base_growth_rate(-1.0).build();
        assert!(matches!(result, Err(ParameterError::InvalidGrowthRate(_))));
    }

    #[test]
    fn test_negative_growth_rate_allowed() {
        let params = ParameterSet::builder().base_growth_rate(-0.2).build();
        assert!(params.is_ok());
    }

    #[test]
    fn test_invalid_volatility() {
        let result = ParameterSet::builder().volatility(-0.01).build();
        assert!(matches!(result, Err(ParameterError::InvalidVolatility(_))));
    }

    #[test]
    fn test_adoption_rate_out_of_range() {
        let result = ParameterSet::builder()
            .adoption_rate(Segment::Large, 1.2)
            .build();
        assert_eq!(
            result,
            Err(ParameterError::AdoptionRateOutOfRange {
                group: "large",
                rate: 1.2
            })
        );
    }

    #[test]
    fn test_missing_segment_rate() {
        let result = ParameterSet::builder()
            .initial_adoption_rates(BTreeMap::from([(Segment::Sme, 0.5)]))
            .build();
        assert_eq!(
            result,
            Err(ParameterError::MissingAdoptionRate(Segment::Large))
        );
    }

    #[test]
    fn test_adoption_rate_bounds_inclusive() {
        let params = ParameterSet::builder()
            .adoption_rate(Segment::Sme, 0.0)
            .adoption_rate(Segment::Large, 1.0)
            .build();
        assert!(params.is_ok());
    }

    #[test]
    fn test_invalid_segment_weights() {
        let result = ParameterSet::builder()
            .segment_weights(SegmentWeights::new(0.6, 0.3))
            .build();
        assert!(matches!(
            result,
            Err(ParameterError::InvalidSegmentWeights { .. })
        ));
    }

    #[test]
    fn test_invalid_bass_coefficient() {
        let result = ParameterSet::builder()
            .bass(BassCoefficients::new(-0.01, 0.38))
            .build();
        assert!(matches!(
            result,
            Err(ParameterError::InvalidCoefficient {
                name: "innovation",
                ..
            })
        ));
    }
}
