//! Error types for parameter validation.
//!
//! Every variant is a configuration error: it is raised when the
//! parameter set is built, before any simulation work starts.

use thiserror::Error;

use super::segment::Segment;

/// Errors raised while validating a [`ParameterSet`](super::ParameterSet).
///
/// # Examples
/// ```
/// use adoption_core::types::ParameterError;
///
/// let err = ParameterError::InvalidPathCount(0);
/// assert_eq!(
///     err.to_string(),
///     "Invalid path count 0: must be in range [1, 10_000_000]"
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParameterError {
    /// Time horizon outside [1, 1_000] years.
    #[error("Invalid time horizon {0}: must be in range [1, 1_000] years")]
    InvalidTimeHorizon(usize),

    /// Path count outside [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Initial market size not finite and positive.
    #[error("Invalid initial market size {0}: must be finite and positive")]
    InvalidMarketSize(f64),

    /// Base growth rate not finite or at or below -100%.
    #[error("Invalid base growth rate {0}: must be finite and greater than -1")]
    InvalidGrowthRate(f64),

    /// Volatility not finite and non-negative.
    #[error("Invalid volatility {0}: must be finite and non-negative")]
    InvalidVolatility(f64),

    /// A segment has no initial adoption rate.
    #[error("Missing initial adoption rate for segment '{0}'")]
    MissingAdoptionRate(Segment),

    /// An initial adoption rate lies outside [0, 1].
    #[error("Initial adoption rate for '{group}' is {rate}: must be in [0, 1]")]
    AdoptionRateOutOfRange {
        /// Segment name.
        group: &'static str,
        /// Offending rate.
        rate: f64,
    },

    /// Segment weights are negative or do not sum to one.
    #[error("Invalid segment weights (sme={sme}, large={large}): must be non-negative and sum to 1")]
    InvalidSegmentWeights {
        /// SME weight.
        sme: f64,
        /// Large enterprise weight.
        large: f64,
    },

    /// A Bass coefficient is negative or not finite.
    #[error("Invalid Bass coefficient '{name}': {value}")]
    InvalidCoefficient {
        /// Coefficient name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_rate() {
        let err = ParameterError::MissingAdoptionRate(Segment::Large);
        assert_eq!(
            err.to_string(),
            "Missing initial adoption rate for segment 'large'"
        );
    }

    #[test]
    fn test_error_display_rate_out_of_range() {
        let err = ParameterError::AdoptionRateOutOfRange {
            group: "sme",
            rate: 1.5,
        };
        assert!(err.to_string().contains("'sme' is 1.5"));
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(ParameterError::InvalidTimeHorizon(0));
        assert!(err.to_string().contains("time horizon"));
    }
}
