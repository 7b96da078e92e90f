//! Scenario and analysis result types.

use adoption_core::types::ParameterSet;
use adoption_models::scenarios::{ScenarioKind, ScenarioMultipliers, ScenarioSelector};
use serde::Serialize;

use crate::mc::SimulationPath;
use crate::stats::ScenarioStatistics;

/// Outcome of one simulated scenario.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioResult {
    /// Simulated scenario.
    pub scenario: ScenarioSelector,
    /// Resolved multipliers.
    pub multipliers: ScenarioMultipliers,
    /// Per-series per-year statistics.
    pub statistics: ScenarioStatistics,
    /// Raw paths, when retention was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<SimulationPath>>,
}

impl ScenarioResult {
    /// Scenario kind.
    #[inline]
    pub fn kind(&self) -> ScenarioKind {
        self.scenario.kind()
    }

    /// Export label of the scenario.
    #[inline]
    pub fn label(&self) -> &'static str {
        self.kind().name()
    }
}

/// Results of a multi-scenario run, in input order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Parameter set of the run.
    pub params: ParameterSet,
    /// Run seed.
    pub seed: u64,
    /// One result per requested scenario.
    pub results: Vec<ScenarioResult>,
}

impl AnalysisReport {
    /// Result of one scenario kind.
    pub fn get(&self, kind: ScenarioKind) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.kind() == kind)
    }

    /// Iterates over results in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioResult> {
        self.results.iter()
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no scenario was run.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'a> IntoIterator for &'a AnalysisReport {
    type Item = &'a ScenarioResult;
    type IntoIter = std::slice::Iter<'a, ScenarioResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
