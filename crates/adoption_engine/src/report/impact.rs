//! Economic impact of a scenario's final year.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::stats::{ScenarioStatistics, SeriesStatistics};

/// Multipliers translating market size and adoption into economic impact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactAssumptions {
    /// GDP generated per unit of market size.
    pub gdp_multiplier: f64,
    /// Jobs per unit of market size.
    pub jobs_per_unit: f64,
    /// Productivity gain at full adoption, as a fraction.
    pub productivity_multiplier: f64,
}

impl Default for ImpactAssumptions {
    fn default() -> Self {
        Self {
            gdp_multiplier: 3.5,
            jobs_per_unit: 8_500.0,
            productivity_multiplier: 0.22,
        }
    }
}

/// Final-year economic impact of one scenario.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EconomicImpact {
    /// Mean market size.
    pub market_size: f64,
    /// Interquartile market size range `(p25, p75)`.
    pub market_size_range: (f64, f64),
    /// Mean overall adoption.
    pub overall_adoption_rate: f64,
    /// Mean SME adoption.
    pub sme_adoption_rate: f64,
    /// Mean large enterprise adoption.
    pub large_adoption_rate: f64,
    /// `market_size * gdp_multiplier`.
    pub gdp_impact: f64,
    /// `floor(market_size * jobs_per_unit)`.
    pub jobs_created: u64,
    /// `overall_adoption_rate * productivity_multiplier * 100`.
    pub productivity_gain_percent: f64,
}

impl EconomicImpact {
    /// Computes the impact from a scenario's final-year statistics.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyEnsemble` if the statistics cover no year.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adoption_core::types::ParameterSet;
    /// use adoption_engine::mc::{EngineConfig, ScenarioSimulator};
    /// use adoption_engine::report::{EconomicImpact, ImpactAssumptions};
    /// use adoption_models::scenarios::ScenarioSelector;
    ///
    /// let params = ParameterSet::builder().num_paths(100).build().unwrap();
    /// let simulator = ScenarioSimulator::new(params, EngineConfig::default()).unwrap();
    /// let result = simulator.run_scenario(&ScenarioSelector::Baseline).unwrap();
    ///
    /// let impact =
    ///     EconomicImpact::from_statistics(&result.statistics, &ImpactAssumptions::default())
    ///         .unwrap();
    /// assert!(impact.gdp_impact > impact.market_size);
    /// ```
    pub fn from_statistics(
        statistics: &ScenarioStatistics,
        assumptions: &ImpactAssumptions,
    ) -> Result<Self> {
        let market = statistics
            .market_size
            .final_year()
            .ok_or(EngineError::EmptyEnsemble)?;
        let final_mean = |s: &SeriesStatistics| {
            s.final_year().map(|f| f.mean).ok_or(EngineError::EmptyEnsemble)
        };
        let overall = final_mean(&statistics.overall_adoption)?;

        Ok(Self {
            market_size: market.mean,
            market_size_range: (market.p25, market.p75),
            overall_adoption_rate: overall,
            sme_adoption_rate: final_mean(&statistics.sme_adoption)?,
            large_adoption_rate: final_mean(&statistics.large_adoption)?,
            gdp_impact: market.mean * assumptions.gdp_multiplier,
            jobs_created: (market.mean * assumptions.jobs_per_unit).floor() as u64,
            productivity_gain_percent: overall * assumptions.productivity_multiplier * 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn constant_series(values: &[f64]) -> SeriesStatistics {
        let v = values.to_vec();
        SeriesStatistics {
            mean: v.clone(),
            median: v.clone(),
            p5: v.clone(),
            p25: v.iter().map(|x| x * 0.9).collect(),
            p75: v.iter().map(|x| x * 1.1).collect(),
            p95: v.clone(),
            std: vec![0.0; v.len()],
            min: v.clone(),
            max: v,
        }
    }

    fn statistics() -> ScenarioStatistics {
        ScenarioStatistics {
            market_size: constant_series(&[7.56, 20.0]),
            sme_adoption: constant_series(&[0.16, 0.5]),
            large_adoption: constant_series(&[0.42, 0.8]),
            overall_adoption: constant_series(&[0.29, 0.59]),
        }
    }

    #[test]
    fn test_impact_arithmetic() {
        let impact =
            EconomicImpact::from_statistics(&statistics(), &ImpactAssumptions::default()).unwrap();
        assert_eq!(impact.market_size, 20.0);
        assert_relative_eq!(impact.market_size_range.0, 18.0);
        assert_relative_eq!(impact.market_size_range.1, 22.0);
        assert_relative_eq!(impact.gdp_impact, 70.0);
        assert_eq!(impact.jobs_created, 170_000);
        assert_relative_eq!(impact.productivity_gain_percent, 0.59 * 22.0, epsilon = 1e-12);
        assert_eq!(impact.sme_adoption_rate, 0.5);
        assert_eq!(impact.large_adoption_rate, 0.8);
    }

    #[test]
    fn test_jobs_truncated() {
        let mut stats = statistics();
        stats.market_size = constant_series(&[1.0, 1.00001]);
        let impact =
            EconomicImpact::from_statistics(&stats, &ImpactAssumptions::default()).unwrap();
        // 8500.085 -> 8500
        assert_eq!(impact.jobs_created, 8_500);
    }

    #[test]
    fn test_empty_statistics() {
        assert_eq!(
            EconomicImpact::from_statistics(
                &ScenarioStatistics::default(),
                &ImpactAssumptions::default()
            ),
            Err(EngineError::EmptyEnsemble)
        );
    }
}
