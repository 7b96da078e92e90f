//! Policy recommendations from the baseline and policy scenarios.
//!
//! Rules, on final-year impacts:
//! - SME support (High): policy SME adoption above 110% of baseline
//! - Market development (High): policy market size more than 5% above baseline
//! - Employment (Medium): more than 10,000 additional jobs

use adoption_models::scenarios::ScenarioKind;
use serde::Serialize;
use std::fmt;

use super::impact::{EconomicImpact, ImpactAssumptions};
use crate::analysis::AnalysisReport;
use crate::error::{EngineError, Result};

/// Relative SME adoption uplift above which SME support is recommended.
pub const SME_UPLIFT_THRESHOLD: f64 = 1.1;

/// Market size uplift, in percent, above which market development is recommended.
pub const MARKET_GROWTH_THRESHOLD_PERCENT: f64 = 5.0;

/// Additional jobs above which an employment focus is recommended.
pub const JOBS_THRESHOLD: i64 = 10_000;

/// Recommendation priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    /// Act first.
    High,
    /// Act once high-priority items are in place.
    Medium,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => f.write_str("High"),
            Priority::Medium => f.write_str("Medium"),
        }
    }
}

/// One policy recommendation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    /// Priority.
    pub priority: Priority,
    /// Policy area.
    pub area: String,
    /// Recommended action.
    pub recommendation: String,
    /// Expected effect on adoption or market size.
    pub impact: String,
    /// Expected economic benefit.
    pub economic_benefit: String,
}

/// Compares the policy scenario with the baseline.
///
/// # Examples
///
/// ```rust
/// use adoption_engine::report::{compare_impacts, EconomicImpact, Priority};
///
/// let baseline = EconomicImpact {
///     market_size: 20.0,
///     market_size_range: (18.0, 22.0),
///     overall_adoption_rate: 0.5,
///     sme_adoption_rate: 0.4,
///     large_adoption_rate: 0.7,
///     gdp_impact: 70.0,
///     jobs_created: 170_000,
///     productivity_gain_percent: 11.0,
/// };
/// let policy = EconomicImpact { sme_adoption_rate: 0.5, ..baseline };
///
/// let recommendations = compare_impacts(&baseline, &policy);
/// assert_eq!(recommendations.len(), 1);
/// assert_eq!(recommendations[0].priority, Priority::High);
/// ```
pub fn compare_impacts(baseline: &EconomicImpact, policy: &EconomicImpact) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if policy.sme_adoption_rate > baseline.sme_adoption_rate * SME_UPLIFT_THRESHOLD {
        recommendations.push(Recommendation {
            priority: Priority::High,
            area: "SME Support".to_string(),
            recommendation: "Implement a comprehensive SME technology support programme"
                .to_string(),
            impact: format!(
                "Could increase SME adoption from {:.1}% to {:.1}%",
                baseline.sme_adoption_rate * 100.0,
                policy.sme_adoption_rate * 100.0
            ),
            economic_benefit: format!(
                "Additional {:.1} GDP impact",
                policy.gdp_impact - baseline.gdp_impact
            ),
        });
    }

    let market_growth = (policy.market_size / baseline.market_size - 1.0) * 100.0;
    if market_growth > MARKET_GROWTH_THRESHOLD_PERCENT {
        recommendations.push(Recommendation {
            priority: Priority::High,
            area: "Market Development".to_string(),
            recommendation: "Accelerate market development through policy intervention"
                .to_string(),
            impact: format!("Could increase market size by {market_growth:.1}%"),
            economic_benefit: format!(
                "Market size could reach {:.1} vs {:.1} baseline",
                policy.market_size, baseline.market_size
            ),
        });
    }

    let job_difference = policy.jobs_created as i64 - baseline.jobs_created as i64;
    if job_difference > JOBS_THRESHOLD {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            area: "Employment".to_string(),
            recommendation: "Focus on job creation and workforce development".to_string(),
            impact: format!(
                "Could create {} additional jobs",
                group_thousands(job_difference)
            ),
            economic_benefit: format!(
                "Total jobs: {}",
                group_thousands(policy.jobs_created as i64)
            ),
        });
    }

    recommendations
}

/// Recommendations for a report holding both the baseline and the policy
/// intervention scenario.
///
/// # Errors
///
/// Returns `EngineError::MissingScenario` if either scenario is absent.
pub fn recommend(
    report: &AnalysisReport,
    assumptions: &ImpactAssumptions,
) -> Result<Vec<Recommendation>> {
    let impact_of = |kind: ScenarioKind| -> Result<EconomicImpact> {
        let result = report.get(kind).ok_or(EngineError::MissingScenario(kind))?;
        EconomicImpact::from_statistics(&result.statistics, assumptions)
    };
    let baseline = impact_of(ScenarioKind::Baseline)?;
    let policy = impact_of(ScenarioKind::PolicyIntervention)?;
    Ok(compare_impacts(&baseline, &policy))
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impact(market_size: f64, sme: f64) -> EconomicImpact {
        EconomicImpact {
            market_size,
            market_size_range: (market_size * 0.9, market_size * 1.1),
            overall_adoption_rate: 0.5,
            sme_adoption_rate: sme,
            large_adoption_rate: 0.7,
            gdp_impact: market_size * 3.5,
            jobs_created: (market_size * 8_500.0) as u64,
            productivity_gain_percent: 11.0,
        }
    }

    #[test]
    fn test_no_recommendations_when_equal() {
        let base = impact(20.0, 0.4);
        assert!(compare_impacts(&base, &base).is_empty());
    }

    #[test]
    fn test_all_rules_fire() {
        let base = impact(20.0, 0.4);
        let policy = impact(24.0, 0.5);
        let recs = compare_impacts(&base, &policy);
        let areas: Vec<&str> = recs.iter().map(|r| r.area.as_str()).collect();
        assert_eq!(areas, vec!["SME Support", "Market Development", "Employment"]);
        assert_eq!(recs[2].priority, Priority::Medium);
        assert!(recs[1].impact.contains("20.0%"));
        assert!(recs[2].impact.contains("34,000"));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let base = impact(100.0, 0.4);
        // 4.9% more market, exactly 10% more SME adoption
        let policy = impact(104.9, 0.4 * SME_UPLIFT_THRESHOLD);
        let recs = compare_impacts(&base, &policy);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].area, "Employment");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }
}
