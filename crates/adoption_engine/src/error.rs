//! Engine error type.
//!
//! Every error is raised before any statistics are aggregated, so a failed
//! run never produces a partial ensemble.

use adoption_core::types::{ParameterError, Segment};
use adoption_models::scenarios::{ScenarioError, ScenarioKind};
use adoption_models::shocks::RegistryError;
use thiserror::Error;

/// Errors raised by the simulation engine.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    /// Invalid parameter set.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// Scenario could not be resolved.
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// Invalid shock driver registry.
    #[error("Shock registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Injected shock matrix does not fit the parameter set.
    #[error("Shock matrix has {found} years per path, expected {expected}")]
    ShockShape {
        /// Horizon of the parameter set.
        expected: usize,
        /// Columns of the supplied matrix.
        found: usize,
    },

    /// A shock factor is negative or not finite.
    #[error("Shock factor at path {path}, year {year} is invalid: {value}")]
    InvalidShock {
        /// Path index.
        path: usize,
        /// Year column.
        year: usize,
        /// Offending value.
        value: f64,
    },

    /// A year-0 segment rate lies above the scenario's potential for it.
    #[error("Initial adoption {initial} for '{segment}' exceeds the scenario potential {potential}")]
    InitialAbovePotential {
        /// Segment.
        segment: Segment,
        /// Year-0 rate.
        initial: f64,
        /// Resolved potential.
        potential: f64,
    },

    /// Market size could leave the finite range within the horizon.
    #[error("Market size may overflow: log peak {log_peak:.1} exceeds limit {limit:.1}")]
    MarketSizeOverflow {
        /// Upper bound on the log market size over the horizon.
        log_peak: f64,
        /// Largest log market size the statistics can absorb.
        limit: f64,
    },

    /// An evolved state is not finite.
    #[error("Path {path} is not finite in year {year}")]
    NonFiniteState {
        /// Path index.
        path: usize,
        /// Year of the first non-finite state.
        year: usize,
    },

    /// Statistics were requested for an empty ensemble.
    #[error("Cannot aggregate an empty ensemble")]
    EmptyEnsemble,

    /// The same scenario kind was requested twice in one run.
    #[error("Scenario '{0}' appears more than once")]
    DuplicateScenario(ScenarioKind),

    /// A scenario needed for a comparison is absent from the report.
    #[error("Scenario '{0}' is missing from the analysis results")]
    MissingScenario(ScenarioKind),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: EngineError = ParameterError::InvalidPathCount(0).into();
        assert!(err.to_string().contains("Invalid path count 0"));

        let err: EngineError = ScenarioError::DegeneratePotential {
            segment: Segment::Sme,
            potential: 0.0,
        }
        .into();
        assert!(err.to_string().contains("sme"));

        let err: EngineError = RegistryError::Empty.into();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_initial_above_potential_display() {
        let err = EngineError::InitialAbovePotential {
            segment: Segment::Large,
            initial: 0.95,
            potential: 0.8,
        };
        let text = err.to_string();
        assert!(text.contains("large") && text.contains("0.95"), "{text}");
    }

    #[test]
    fn test_missing_scenario_display() {
        let err = EngineError::MissingScenario(ScenarioKind::PolicyIntervention);
        assert!(err.to_string().contains("policy_intervention"));
    }
}
