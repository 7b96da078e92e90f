//! Sample statistics over a single ensemble column.
//!
//! Conventions:
//! - Standard deviation is the population form (divides by `n`).
//! - Percentiles interpolate linearly between the closest ranks, with the
//!   fractional rank `q / 100 * (n - 1)` over the ascending sample.

use serde::Serialize;

/// Arithmetic mean. Returns NaN for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. Returns NaN for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    let mu = mean(values);
    let variance = values.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Percentile `q` (in [0, 100]) of an ascending-sorted sample.
///
/// Returns NaN for an empty slice.
///
/// # Examples
///
/// ```rust
/// use adoption_core::math::percentile_sorted;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile_sorted(&sorted, 50.0), 2.5);
/// assert_eq!(percentile_sorted(&sorted, 0.0), 1.0);
/// assert_eq!(percentile_sorted(&sorted, 100.0), 4.0);
/// ```
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (q.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Distribution summary of one ensemble column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// 50th percentile.
    pub median: f64,
    /// 5th percentile.
    pub p5: f64,
    /// 25th percentile.
    pub p25: f64,
    /// 75th percentile.
    pub p75: f64,
    /// 95th percentile.
    pub p95: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
}

impl SampleSummary {
    /// Summarises a sample, consuming it for in-place sorting.
    ///
    /// Returns `None` for an empty sample.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adoption_core::math::SampleSummary;
    ///
    /// let summary = SampleSummary::from_samples(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
    /// assert_eq!(summary.mean, 2.5);
    /// assert_eq!(summary.median, 2.5);
    /// assert_eq!(summary.min, 1.0);
    /// ```
    pub fn from_samples(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let min = values[0];
        let max = values[values.len() - 1];
        // Summation rounding can move the mean of a near-constant sample an
        // ulp past its extremes.
        let mu = mean(&values).clamp(min, max);

        Some(Self {
            mean: mu,
            median: percentile_sorted(&values, 50.0),
            p5: percentile_sorted(&values, 5.0),
            p25: percentile_sorted(&values, 25.0),
            p75: percentile_sorted(&values, 75.0),
            p95: percentile_sorted(&values, 95.0),
            std: population_std(&values),
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_mean_and_population_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0);
        // Population form: sqrt(32 / 8) = 2
        assert_relative_eq!(population_std(&values), 2.0);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
        // rank = 0.05 * 9 = 0.45 -> 1 + 0.45
        assert_relative_eq!(percentile_sorted(&sorted, 5.0), 1.45, epsilon = 1e-12);
        // rank = 0.25 * 9 = 2.25 -> 3.25
        assert_relative_eq!(percentile_sorted(&sorted, 25.0), 3.25, epsilon = 1e-12);
        assert_relative_eq!(percentile_sorted(&sorted, 50.0), 5.5, epsilon = 1e-12);
        assert_relative_eq!(percentile_sorted(&sorted, 95.0), 9.55, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_degenerate_samples() {
        assert!(percentile_sorted(&[], 50.0).is_nan());
        assert_eq!(percentile_sorted(&[3.0], 95.0), 3.0);
    }

    #[test]
    fn test_summary_empty() {
        assert!(SampleSummary::from_samples(Vec::new()).is_none());
    }

    #[test]
    fn test_summary_constant_sample() {
        let summary = SampleSummary::from_samples(vec![0.1; 1_000]).unwrap();
        assert_eq!(summary.min, 0.1);
        assert_eq!(summary.max, 0.1);
        assert!(summary.mean >= summary.min && summary.mean <= summary.max);
        assert_eq!(summary.p5, 0.1);
        assert_eq!(summary.p95, 0.1);
        assert!(summary.std < 1e-12);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Percentiles are ordered and the mean lies within the sample range.
        #[test]
        fn prop_summary_ordering(values in prop::collection::vec(-1e6f64..1e6, 1..200)) {
            let summary = SampleSummary::from_samples(values).unwrap();
            prop_assert!(summary.min <= summary.p5);
            prop_assert!(summary.p5 <= summary.p25);
            prop_assert!(summary.p25 <= summary.median);
            prop_assert!(summary.median <= summary.p75);
            prop_assert!(summary.p75 <= summary.p95);
            prop_assert!(summary.p95 <= summary.max);
            prop_assert!(summary.mean >= summary.min && summary.mean <= summary.max);
            prop_assert!(summary.std >= 0.0);
        }
    }
}
