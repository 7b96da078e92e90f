//! Scenario resolution errors.
//!
//! All variants are configuration errors raised before simulation starts.

use adoption_core::types::Segment;
use thiserror::Error;

use super::selector::ScenarioKind;

/// Errors raised while parsing or resolving a scenario.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ScenarioError {
    /// Scenario name not recognised.
    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),

    /// A policy effect required by the policy scenario is absent.
    #[error("Policy intervention requires the '{0}' effect")]
    MissingPolicyEffect(&'static str),

    /// A policy effect key is not recognised.
    #[error("Unknown policy effect '{0}'")]
    UnknownPolicyEffect(String),

    /// A policy effect magnitude is NaN or infinite.
    #[error("Policy effect '{name}' is not finite: {value}")]
    NonFinitePolicyEffect {
        /// Effect name.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// Policy effects were supplied for a scenario that does not use them.
    #[error("Scenario '{0}' does not accept policy effects")]
    UnexpectedPolicyEffects(ScenarioKind),

    /// A resolved multiplier is not strictly positive and finite.
    #[error("Multiplier '{name}' must be positive and finite, got {value}")]
    NonPositiveMultiplier {
        /// Multiplier name, e.g. `sme.innovation`.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A market potential is not positive, which would divide by zero in
    /// the diffusion step.
    #[error("Market potential for '{segment}' must be positive, got {potential}")]
    DegeneratePotential {
        /// Affected segment.
        segment: Segment,
        /// Offending potential.
        potential: f64,
    },

    /// A market potential exceeds 1; adoption is a fraction of the market.
    #[error("Market potential for '{segment}' must not exceed 1, got {potential}")]
    PotentialAboveOne {
        /// Affected segment.
        segment: Segment,
        /// Offending potential.
        potential: f64,
    },
}
