//! Export document.
//!
//! Shape of the JSON document:
//! ```text
//! {
//!   "<scenario>": {
//!     "multipliers": { ... },
//!     "policy_effects": { ... },          // policy scenario only
//!     "statistics": { "<series>": { "mean": [...], ... } },
//!     "economic_impact": { ... },
//!     "paths": [...]                      // when raw paths are retained
//!   },
//!   ...,
//!   "policy_recommendations": [ ... ]     // baseline and policy scenario present
//! }
//! ```
//! Scenarios appear in run order; every numeric array is indexed by year.

use adoption_core::types::Series;
use adoption_models::scenarios::{PolicyEffects, ScenarioKind, ScenarioMultipliers};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::impact::{EconomicImpact, ImpactAssumptions};
use super::recommendations::{recommend, Recommendation};
use crate::analysis::AnalysisReport;
use crate::error::Result;
use crate::mc::SimulationPath;
use crate::stats::ScenarioStatistics;

/// Exported view of one scenario.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioExport {
    /// Scenario label, used as the document key.
    #[serde(skip)]
    pub label: &'static str,
    /// Resolved multipliers.
    pub multipliers: ScenarioMultipliers,
    /// Policy effects of the policy scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_effects: Option<PolicyEffects>,
    /// Per-series statistics.
    pub statistics: ScenarioStatistics,
    /// Final-year economic impact.
    pub economic_impact: EconomicImpact,
    /// Raw paths, when retained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<SimulationPath>>,
}

/// One flat statistics row: a (scenario, series, year) triple.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatisticsRow {
    /// Scenario label.
    pub scenario: &'static str,
    /// Series name.
    pub series: &'static str,
    /// Year index.
    pub year: usize,
    /// Mean.
    pub mean: f64,
    /// Median.
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
}

/// Complete export of an analysis run.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportDocument {
    /// Scenarios in run order.
    pub scenarios: Vec<ScenarioExport>,
    /// Recommendations, when both the baseline and the policy scenario ran.
    pub policy_recommendations: Option<Vec<Recommendation>>,
}

impl ExportDocument {
    /// Builds the export of a report.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyEnsemble` if a scenario has no statistics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adoption_core::types::ParameterSet;
    /// use adoption_engine::mc::{EngineConfig, ScenarioSimulator};
    /// use adoption_engine::report::{ExportDocument, ImpactAssumptions};
    ///
    /// let params = ParameterSet::builder().num_paths(100).build().unwrap();
    /// let simulator = ScenarioSimulator::new(params, EngineConfig::default()).unwrap();
    /// let report = simulator.run_standard_analysis().unwrap();
    ///
    /// let document = ExportDocument::build(&report, &ImpactAssumptions::default()).unwrap();
    /// let json = document.to_json_pretty().unwrap();
    /// assert!(json.contains("\"policy_recommendations\""));
    /// ```
    pub fn build(report: &AnalysisReport, assumptions: &ImpactAssumptions) -> Result<Self> {
        let scenarios = report
            .iter()
            .map(|result| -> Result<ScenarioExport> {
                Ok(ScenarioExport {
                    label: result.label(),
                    multipliers: result.multipliers,
                    policy_effects: result.scenario.policy_effects().cloned(),
                    statistics: result.statistics.clone(),
                    economic_impact: EconomicImpact::from_statistics(
                        &result.statistics,
                        assumptions,
                    )?,
                    paths: result.paths.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let has_comparison = report.get(ScenarioKind::Baseline).is_some()
            && report.get(ScenarioKind::PolicyIntervention).is_some();
        let policy_recommendations = if has_comparison {
            Some(recommend(report, assumptions)?)
        } else {
            None
        };

        Ok(Self {
            scenarios,
            policy_recommendations,
        })
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Flat rows, one per (scenario, series, year), in document order.
    pub fn rows(&self) -> Vec<StatisticsRow> {
        let mut rows = Vec::new();
        for scenario in &self.scenarios {
            for series in Series::ALL {
                let stats = scenario.statistics.series(series);
                for year in 0..stats.len() {
                    rows.push(StatisticsRow {
                        scenario: scenario.label,
                        series: series.name(),
                        year,
                        mean: stats.mean[year],
                        median: stats.median[year],
                        p5: stats.p5[year],
                        p25: stats.p25[year],
                        p75: stats.p75[year],
                        p95: stats.p95[year],
                        std: stats.std[year],
                    });
                }
            }
        }
        rows
    }
}

impl Serialize for ExportDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = self.scenarios.len() + usize::from(self.policy_recommendations.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for scenario in &self.scenarios {
            map.serialize_entry(scenario.label, scenario)?;
        }
        if let Some(recommendations) = &self.policy_recommendations {
            map.serialize_entry("policy_recommendations", recommendations)?;
        }
        map.end()
    }
}
