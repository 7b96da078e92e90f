//! Scenario multiplier table.
//!
//! | scenario | growth | sme p | sme q | sme m | large p | large q | large m |
//! |----------|--------|-------|-------|-------|---------|---------|---------|
//! | baseline | 1.00 | 1.0 | 1.0 | 0.80 | 1.0 | 1.0 | 0.90 |
//! | optimistic | 1.15 | 1.3 | 1.2 | 0.85 | 1.2 | 1.1 | 0.95 |
//! | pessimistic | 0.85 | 0.7 | 0.8 | 0.60 | 0.8 | 0.9 | 0.80 |
//! | disruption | 1.25 | 0.8 | 1.4 | 0.90 | 1.5 | 1.0 | 0.95 |
//!
//! The policy scenario starts from the baseline row:
//! ```text
//! sme.innovation *= 1 + sme_support
//! sme.potential  += 0.3 * sme_support     (capped at 1)
//! market_growth  *= 1 + overall_boost
//! ```

use serde::{Deserialize, Serialize};

use super::error::ScenarioError;
use super::multipliers::{ScenarioMultipliers, SegmentMultipliers};
use super::selector::{ScenarioSelector, OVERALL_BOOST, SME_SUPPORT};

/// Share of SME support that lifts the SME potential.
pub const POLICY_POTENTIAL_SENSITIVITY: f64 = 0.3;

/// Multiplier table for the table-driven scenarios.
///
/// Passed explicitly to the engine so that engines with different
/// assumptions can run side by side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTable {
    /// Reference row; also the starting point of the policy scenario.
    pub baseline: ScenarioMultipliers,
    /// Optimistic row.
    pub optimistic: ScenarioMultipliers,
    /// Pessimistic row.
    pub pessimistic: ScenarioMultipliers,
    /// Disruption row.
    pub disruption: ScenarioMultipliers,
    /// Potential uplift per unit of SME support.
    pub policy_potential_sensitivity: f64,
}

impl Default for ScenarioTable {
    fn default() -> Self {
        Self {
            baseline: ScenarioMultipliers::new(
                1.0,
                SegmentMultipliers::new(1.0, 1.0, 0.8),
                SegmentMultipliers::new(1.0, 1.0, 0.9),
            ),
            optimistic: ScenarioMultipliers::new(
                1.15,
                SegmentMultipliers::new(1.3, 1.2, 0.85),
                SegmentMultipliers::new(1.2, 1.1, 0.95),
            ),
            pessimistic: ScenarioMultipliers::new(
                0.85,
                SegmentMultipliers::new(0.7, 0.8, 0.6),
                SegmentMultipliers::new(0.8, 0.9, 0.8),
            ),
            disruption: ScenarioMultipliers::new(
                1.25,
                SegmentMultipliers::new(0.8, 1.4, 0.9),
                SegmentMultipliers::new(1.5, 1.0, 0.95),
            ),
            policy_potential_sensitivity: POLICY_POTENTIAL_SENSITIVITY,
        }
    }
}

impl ScenarioTable {
    /// Resolves a selector to validated multipliers.
    ///
    /// # Errors
    ///
    /// - policy effect errors from [`PolicyEffects::validate`](super::PolicyEffects::validate)
    /// - `DegeneratePotential`, `PotentialAboveOne` or `NonPositiveMultiplier`
    ///   if the resolved record fails [`ScenarioMultipliers::validate`]
    ///
    /// # Examples
    ///
    /// ```
    /// use adoption_models::scenarios::{ScenarioSelector, ScenarioTable};
    ///
    /// let table = ScenarioTable::default();
    /// let m = table.resolve(&ScenarioSelector::Pessimistic).unwrap();
    /// assert_eq!(m.market_growth, 0.85);
    /// ```
    pub fn resolve(&self, selector: &ScenarioSelector) -> Result<ScenarioMultipliers, ScenarioError> {
        let multipliers = match selector {
            ScenarioSelector::Baseline => self.baseline,
            ScenarioSelector::Optimistic => self.optimistic,
            ScenarioSelector::Pessimistic => self.pessimistic,
            ScenarioSelector::Disruption => self.disruption,
            ScenarioSelector::PolicyIntervention(effects) => {
                effects.validate()?;
                let sme_support = effects.require(SME_SUPPORT)?;
                let overall_boost = effects.require(OVERALL_BOOST)?;

                let mut m = self.baseline;
                m.sme.innovation *= 1.0 + sme_support;
                m.sme.potential =
                    (m.sme.potential + sme_support * self.policy_potential_sensitivity).min(1.0);
                m.market_growth *= 1.0 + overall_boost;
                m
            }
        };
        multipliers.validate()?;
        Ok(multipliers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::PolicyEffects;
    use adoption_core::types::Segment;
    use approx::assert_relative_eq;

    fn policy(sme_support: f64, overall_boost: f64) -> ScenarioSelector {
        ScenarioSelector::PolicyIntervention(
            PolicyEffects::new()
                .with(SME_SUPPORT, sme_support)
                .with(OVERALL_BOOST, overall_boost),
        )
    }

    #[test]
    fn test_default_rows_valid() {
        let table = ScenarioTable::default();
        for selector in [
            ScenarioSelector::Baseline,
            ScenarioSelector::Optimistic,
            ScenarioSelector::Pessimistic,
            ScenarioSelector::Disruption,
        ] {
            assert!(table.resolve(&selector).is_ok(), "{selector}");
        }
    }

    #[test]
    fn test_directional_ordering() {
        let table = ScenarioTable::default();
        let base = table.resolve(&ScenarioSelector::Baseline).unwrap();
        let up = table.resolve(&ScenarioSelector::Optimistic).unwrap();
        let down = table.resolve(&ScenarioSelector::Pessimistic).unwrap();
        assert!(up.market_growth > base.market_growth && base.market_growth > down.market_growth);
        for segment in Segment::ALL {
            assert!(up.potential(segment) > base.potential(segment));
            assert!(base.potential(segment) > down.potential(segment));
        }
    }

    #[test]
    fn test_policy_intervention_lifts_sme_and_growth() {
        let table = ScenarioTable::default();
        let base = table.resolve(&ScenarioSelector::Baseline).unwrap();
        let m = table.resolve(&policy(0.15, 0.05)).unwrap();

        assert!(m.sme.potential > base.sme.potential);
        assert!(m.market_growth > base.market_growth);
        assert_relative_eq!(m.sme.innovation, 1.15);
        assert_relative_eq!(m.sme.potential, 0.8 + 0.045, epsilon = 1e-12);
        assert_relative_eq!(m.market_growth, 1.05);
        // Large segment untouched
        assert_eq!(m.large, base.large);
    }

    #[test]
    fn test_policy_potential_capped() {
        let m = ScenarioTable::default().resolve(&policy(2.0, 0.0)).unwrap();
        assert_eq!(m.sme.potential, 1.0);
    }

    #[test]
    fn test_policy_potential_degenerate() {
        // 0.8 + 0.3 * (-2.9) < 0 and innovation multiplier < 0
        let result = ScenarioTable::default().resolve(&policy(-2.9, 0.0));
        assert!(matches!(
            result,
            Err(ScenarioError::DegeneratePotential {
                segment: Segment::Sme,
                ..
            })
        ));
    }

    #[test]
    fn test_policy_boost_collapsing_growth() {
        let result = ScenarioTable::default().resolve(&policy(0.0, -1.0));
        assert!(matches!(
            result,
            Err(ScenarioError::NonPositiveMultiplier {
                name: "market_growth",
                ..
            })
        ));
    }

    #[test]
    fn test_policy_missing_key() {
        let selector =
            ScenarioSelector::PolicyIntervention(PolicyEffects::new().with(SME_SUPPORT, 0.1));
        assert_eq!(
            ScenarioTable::default().resolve(&selector),
            Err(ScenarioError::MissingPolicyEffect(OVERALL_BOOST))
        );
    }

    #[test]
    fn test_custom_table_degenerate_row() {
        let mut table = ScenarioTable::default();
        table.disruption.large.potential = 0.0;
        assert!(matches!(
            table.resolve(&ScenarioSelector::Disruption),
            Err(ScenarioError::DegeneratePotential {
                segment: Segment::Large,
                ..
            })
        ));
    }
}
