//! Resolved scenario multipliers.

use adoption_core::types::{BassCoefficients, Segment};
use serde::{Deserialize, Serialize};

use super::error::ScenarioError;
use crate::diffusion::BassDiffusion;

/// Diffusion adjustments of one segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentMultipliers {
    /// Multiplier on the base innovation coefficient.
    pub innovation: f64,
    /// Multiplier on the base imitation coefficient.
    pub imitation: f64,
    /// Market potential (absolute ceiling) in (0, 1].
    pub potential: f64,
}

impl SegmentMultipliers {
    /// Creates a segment record.
    pub const fn new(innovation: f64, imitation: f64, potential: f64) -> Self {
        Self {
            innovation,
            imitation,
            potential,
        }
    }
}

/// Scenario-specific adjustments of growth and diffusion.
///
/// # Examples
///
/// ```
/// use adoption_core::types::{BassCoefficients, Segment};
/// use adoption_models::scenarios::{ScenarioMultipliers, SegmentMultipliers};
///
/// let multipliers = ScenarioMultipliers::new(
///     1.0,
///     SegmentMultipliers::new(2.0, 1.0, 0.8),
///     SegmentMultipliers::new(1.0, 1.0, 0.9),
/// );
/// let sme = multipliers.diffusion(Segment::Sme, BassCoefficients::new(0.03, 0.38));
/// assert_eq!(sme.innovation, 0.06);
/// assert_eq!(sme.potential, 0.8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMultipliers {
    /// Multiplier on annual market growth.
    pub market_growth: f64,
    /// SME adjustments.
    pub sme: SegmentMultipliers,
    /// Large enterprise adjustments.
    pub large: SegmentMultipliers,
}

impl ScenarioMultipliers {
    /// Creates a multiplier record.
    pub const fn new(market_growth: f64, sme: SegmentMultipliers, large: SegmentMultipliers) -> Self {
        Self {
            market_growth,
            sme,
            large,
        }
    }

    /// Adjustments of one segment.
    #[inline]
    pub fn segment(&self, segment: Segment) -> &SegmentMultipliers {
        match segment {
            Segment::Sme => &self.sme,
            Segment::Large => &self.large,
        }
    }

    /// Mutable adjustments of one segment.
    #[inline]
    pub fn segment_mut(&mut self, segment: Segment) -> &mut SegmentMultipliers {
        match segment {
            Segment::Sme => &mut self.sme,
            Segment::Large => &mut self.large,
        }
    }

    /// Market potential of one segment.
    #[inline]
    pub fn potential(&self, segment: Segment) -> f64 {
        self.segment(segment).potential
    }

    /// Largest segment potential.
    pub fn max_potential(&self) -> f64 {
        self.sme.potential.max(self.large.potential)
    }

    /// Scenario-adjusted Bass parameters of a segment.
    #[inline]
    pub fn diffusion(&self, segment: Segment, base: BassCoefficients) -> BassDiffusion {
        let m = self.segment(segment);
        BassDiffusion::new(
            base.innovation * m.innovation,
            base.imitation * m.imitation,
            m.potential,
        )
    }

    /// Checks that every multiplier is strictly positive and finite and
    /// that potentials lie in (0, 1].
    ///
    /// # Errors
    ///
    /// - `DegeneratePotential` for a potential that is not positive
    /// - `PotentialAboveOne` for a potential above 1
    /// - `NonPositiveMultiplier` for any other non-positive or non-finite entry
    pub fn validate(&self) -> Result<(), ScenarioError> {
        check_positive("market_growth", self.market_growth)?;
        for segment in Segment::ALL {
            let m = self.segment(segment);
            if !(m.potential > 0.0) {
                return Err(ScenarioError::DegeneratePotential {
                    segment,
                    potential: m.potential,
                });
            }
            if m.potential > 1.0 {
                return Err(ScenarioError::PotentialAboveOne {
                    segment,
                    potential: m.potential,
                });
            }
            let (innovation, imitation) = match segment {
                Segment::Sme => ("sme.innovation", "sme.imitation"),
                Segment::Large => ("large.innovation", "large.imitation"),
            };
            check_positive(innovation, m.innovation)?;
            check_positive(imitation, m.imitation)?;
        }
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScenarioError::NonPositiveMultiplier { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScenarioMultipliers {
        ScenarioMultipliers::new(
            1.0,
            SegmentMultipliers::new(1.0, 1.0, 0.8),
            SegmentMultipliers::new(1.0, 1.0, 0.9),
        )
    }

    #[test]
    fn test_valid_record() {
        assert!(sample().validate().is_ok());
        assert_eq!(sample().max_potential(), 0.9);
    }

    #[test]
    fn test_zero_potential_is_degenerate() {
        let mut m = sample();
        m.segment_mut(Segment::Large).potential = 0.0;
        assert_eq!(
            m.validate(),
            Err(ScenarioError::DegeneratePotential {
                segment: Segment::Large,
                potential: 0.0
            })
        );
    }

    #[test]
    fn test_nan_potential_is_degenerate() {
        let mut m = sample();
        m.sme.potential = f64::NAN;
        assert!(matches!(
            m.validate(),
            Err(ScenarioError::DegeneratePotential { .. })
        ));
    }

    #[test]
    fn test_potential_above_one_rejected() {
        let mut m = sample();
        m.sme.potential = 1.2;
        assert_eq!(
            m.validate(),
            Err(ScenarioError::PotentialAboveOne {
                segment: Segment::Sme,
                potential: 1.2
            })
        );

        m.sme.potential = f64::INFINITY;
        assert!(matches!(
            m.validate(),
            Err(ScenarioError::PotentialAboveOne { .. })
        ));

        // Exactly 1 is a full market.
        m.sme.potential = 1.0;
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_non_positive_coefficient_rejected() {
        let mut m = sample();
        m.large.imitation = 0.0;
        assert!(matches!(
            m.validate(),
            Err(ScenarioError::NonPositiveMultiplier {
                name: "large.imitation",
                ..
            })
        ));

        let mut m = sample();
        m.market_growth = -0.5;
        assert!(matches!(
            m.validate(),
            Err(ScenarioError::NonPositiveMultiplier {
                name: "market_growth",
                ..
            })
        ));
    }
}
