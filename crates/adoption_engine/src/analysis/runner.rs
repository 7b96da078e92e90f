//! Multi-scenario analysis runner.

use std::collections::BTreeSet;
use std::time::Instant;

use adoption_models::scenarios::{ScenarioMultipliers, ScenarioSelector};
use rayon::prelude::*;
use tracing::info;

use super::result::{AnalysisReport, ScenarioResult};
use crate::error::{EngineError, Result};
use crate::mc::ScenarioSimulator;
use crate::stats::StatisticsAggregator;

impl ScenarioSimulator {
    /// Simulates and aggregates one scenario.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Scenario` if the selector cannot be resolved,
    /// or a feasibility error as for [`run_analysis`](Self::run_analysis).
    pub fn run_scenario(&self, selector: &ScenarioSelector) -> Result<ScenarioResult> {
        let multipliers = self.resolve(selector)?;
        self.check_feasible(&multipliers)?;
        self.run_resolved(selector, multipliers)
    }

    /// Runs every scenario and returns the results in input order.
    ///
    /// All selectors are resolved and checked for feasibility before
    /// anything is simulated, so a bad selector anywhere in the list fails
    /// the run without partial work.
    /// Scenarios are simulated in parallel.
    ///
    /// # Errors
    ///
    /// - `Scenario` if any selector cannot be resolved
    /// - `DuplicateScenario` if a scenario kind appears twice
    /// - `InitialAbovePotential` or `MarketSizeOverflow` if a scenario cannot
    ///   be simulated under the parameter set
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adoption_core::types::ParameterSet;
    /// use adoption_engine::mc::{EngineConfig, ScenarioSimulator};
    /// use adoption_models::scenarios::{ScenarioKind, ScenarioSelector};
    ///
    /// let params = ParameterSet::builder().num_paths(100).build().unwrap();
    /// let simulator = ScenarioSimulator::new(params, EngineConfig::default()).unwrap();
    ///
    /// let report = simulator
    ///     .run_analysis(&[ScenarioSelector::Baseline, ScenarioSelector::Optimistic])
    ///     .unwrap();
    /// assert_eq!(report.len(), 2);
    /// assert!(report.get(ScenarioKind::Optimistic).is_some());
    /// ```
    pub fn run_analysis(&self, scenarios: &[ScenarioSelector]) -> Result<AnalysisReport> {
        let mut seen = BTreeSet::new();
        let mut resolved = Vec::with_capacity(scenarios.len());
        for selector in scenarios {
            if !seen.insert(selector.kind()) {
                return Err(EngineError::DuplicateScenario(selector.kind()));
            }
            let multipliers = self.resolve(selector)?;
            self.check_feasible(&multipliers)?;
            resolved.push(multipliers);
        }

        info!(
            n_scenarios = scenarios.len(),
            n_paths = self.params().num_paths(),
            time_horizon = self.params().time_horizon(),
            seed = self.config().seed(),
            "Starting scenario analysis"
        );
        let started = Instant::now();

        let results = scenarios
            .par_iter()
            .zip(resolved)
            .map(|(selector, multipliers)| self.run_resolved(selector, multipliers))
            .collect::<Result<Vec<_>>>()?;

        info!(
            n_scenarios = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scenario analysis complete"
        );

        Ok(AnalysisReport {
            params: self.params().clone(),
            seed: self.config().seed(),
            results,
        })
    }

    /// Runs the reference scenario set
    /// (see [`ScenarioSelector::standard_set`]).
    pub fn run_standard_analysis(&self) -> Result<AnalysisReport> {
        self.run_analysis(&ScenarioSelector::standard_set())
    }

    fn run_resolved(
        &self,
        selector: &ScenarioSelector,
        multipliers: ScenarioMultipliers,
    ) -> Result<ScenarioResult> {
        let started = Instant::now();
        info!(scenario = %selector, n_paths = self.params().num_paths(), "Running scenario");

        let shocks = self.generate_shocks(selector.kind());
        let paths = self.evolve(&multipliers, &shocks)?;
        let statistics = StatisticsAggregator::aggregate(&paths)?;

        info!(
            scenario = %selector,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scenario complete"
        );

        Ok(ScenarioResult {
            scenario: selector.clone(),
            multipliers,
            statistics,
            paths: self.config().retain_paths().then_some(paths),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::EngineConfig;
    use adoption_core::types::{ParameterSet, Segment};
    use adoption_models::scenarios::{PolicyEffects, ScenarioError, ScenarioKind, SME_SUPPORT};

    fn simulator(retain: bool) -> ScenarioSimulator {
        let params = ParameterSet::builder().num_paths(120).build().unwrap();
        let config = EngineConfig::builder()
            .retain_paths(retain)
            .build()
            .unwrap();
        ScenarioSimulator::new(params, config).unwrap()
    }

    #[test]
    fn test_results_in_input_order() {
        let scenarios = [
            ScenarioSelector::Disruption,
            ScenarioSelector::Baseline,
            ScenarioSelector::Pessimistic,
        ];
        let report = simulator(false).run_analysis(&scenarios).unwrap();
        let kinds: Vec<ScenarioKind> = report.iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ScenarioKind::Disruption,
                ScenarioKind::Baseline,
                ScenarioKind::Pessimistic
            ]
        );
        assert!(report.iter().all(|r| r.paths.is_none()));
    }

    #[test]
    fn test_invalid_scenario_fails_before_simulation() {
        let bad = ScenarioSelector::PolicyIntervention(PolicyEffects::new().with(SME_SUPPORT, 0.1));
        let result = simulator(false).run_analysis(&[ScenarioSelector::Baseline, bad]);
        assert!(matches!(
            result,
            Err(EngineError::Scenario(ScenarioError::MissingPolicyEffect(_)))
        ));
    }

    #[test]
    fn test_initial_above_any_potential_fails_whole_run() {
        // 0.7 fits the baseline SME potential of 0.8 but not the pessimistic 0.6.
        let params = ParameterSet::builder()
            .num_paths(50)
            .adoption_rate(Segment::Sme, 0.7)
            .build()
            .unwrap();
        let sim = ScenarioSimulator::new(params, EngineConfig::default()).unwrap();
        assert!(sim.run_scenario(&ScenarioSelector::Baseline).is_ok());

        let result = sim.run_analysis(&[ScenarioSelector::Baseline, ScenarioSelector::Pessimistic]);
        assert_eq!(
            result,
            Err(EngineError::InitialAbovePotential {
                segment: Segment::Sme,
                initial: 0.7,
                potential: 0.6,
            })
        );
    }

    #[test]
    fn test_duplicate_scenario_rejected() {
        let result = simulator(false)
            .run_analysis(&[ScenarioSelector::Baseline, ScenarioSelector::Baseline]);
        assert_eq!(
            result,
            Err(EngineError::DuplicateScenario(ScenarioKind::Baseline))
        );
    }

    #[test]
    fn test_retained_paths() {
        let result = simulator(true)
            .run_scenario(&ScenarioSelector::Optimistic)
            .unwrap();
        let paths = result.paths.as_ref().unwrap();
        assert_eq!(paths.len(), 120);
        assert_eq!(result.label(), "optimistic");
    }

    #[test]
    fn test_run_scenario_matches_analysis() {
        let sim = simulator(false);
        let single = sim.run_scenario(&ScenarioSelector::Pessimistic).unwrap();
        let report = sim.run_standard_analysis().unwrap();
        assert_eq!(report.len(), 5);
        assert_eq!(report.get(ScenarioKind::Pessimistic), Some(&single));
    }
}
