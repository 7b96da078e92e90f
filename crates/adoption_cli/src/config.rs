//! Run configuration.
//!
//! Loaded from a TOML file with environment variable overrides. Every
//! section is optional and falls back to the reference study values:
//!
//! ```toml
//! log_level = "info"
//!
//! [simulation]
//! time_horizon = 6
//! num_paths = 1000
//! seed = 42
//!
//! [simulation.initial_adoption]
//! sme = 0.16
//! large = 0.42
//!
//! [[scenarios]]
//! name = "baseline"
//!
//! [[scenarios]]
//! name = "policy_intervention"
//! policy_effects = { sme_support = 0.15, overall_boost = 0.05 }
//!
//! [impact]
//! gdp_multiplier = 3.5
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use adoption_core::types::{BassCoefficients, ParameterSet, Segment, SegmentWeights};
use adoption_engine::mc::{
    EngineConfig, ScenarioSimulator, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_SEED,
};
use adoption_engine::report::ImpactAssumptions;
use adoption_engine::EngineError;
use adoption_models::scenarios::{PolicyEffects, ScenarioSelector, ScenarioTable};
use adoption_models::shocks::{ShockDriver, ShockRegistry};
use serde::Deserialize;
use thiserror::Error;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error in the config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation errors, all reported at once
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Year-0 adoption rates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InitialAdoption {
    /// SME adoption rate
    pub sme: f64,
    /// Large enterprise adoption rate
    pub large: f64,
}

impl Default for InitialAdoption {
    fn default() -> Self {
        let params = ParameterSet::default();
        Self {
            sme: params.initial_adoption(Segment::Sme),
            large: params.initial_adoption(Segment::Large),
        }
    }
}

/// `[simulation]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    /// Number of simulated years
    pub time_horizon: usize,
    /// Number of Monte Carlo paths per scenario
    pub num_paths: usize,
    /// Year-0 market size
    pub initial_market_size: f64,
    /// Deterministic annual growth rate
    pub base_growth_rate: f64,
    /// Market volatility
    pub volatility: f64,
    /// Year-0 adoption rates
    pub initial_adoption: InitialAdoption,
    /// Bass innovation and imitation coefficients
    pub bass: BassCoefficients,
    /// Segment weights of overall adoption
    pub segment_weights: SegmentWeights,
    /// Run seed
    pub seed: u64,
    /// Minimum path count for parallel evaluation
    pub parallel_threshold: usize,
    /// Keep raw paths in the results
    pub retain_paths: bool,
}

impl Default for SimulationSection {
    fn default() -> Self {
        let params = ParameterSet::default();
        Self {
            time_horizon: params.time_horizon(),
            num_paths: params.num_paths(),
            initial_market_size: params.initial_market_size(),
            base_growth_rate: params.base_growth_rate(),
            volatility: params.volatility(),
            initial_adoption: InitialAdoption::default(),
            bass: params.bass(),
            segment_weights: params.segment_weights(),
            seed: DEFAULT_SEED,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            retain_paths: false,
        }
    }
}

/// One `[[scenarios]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioEntry {
    /// Scenario name, e.g. `optimistic`
    pub name: String,
    /// Policy effects, for `policy_intervention`
    #[serde(default)]
    pub policy_effects: Option<PolicyEffects>,
}

impl ScenarioEntry {
    /// Parses the entry into a selector.
    pub fn to_selector(&self) -> Result<ScenarioSelector, EngineError> {
        Ok(ScenarioSelector::from_parts(
            &self.name,
            self.policy_effects.clone(),
        )?)
    }
}

impl From<&ScenarioSelector> for ScenarioEntry {
    fn from(selector: &ScenarioSelector) -> Self {
        Self {
            name: selector.kind().name().to_string(),
            policy_effects: selector.policy_effects().cloned(),
        }
    }
}

fn default_scenarios() -> Vec<ScenarioEntry> {
    ScenarioSelector::standard_set()
        .iter()
        .map(ScenarioEntry::from)
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Simulation parameters
    #[serde(default)]
    pub simulation: SimulationSection,

    /// Scenarios to run, in order
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioEntry>,

    /// Economic impact assumptions
    #[serde(default)]
    pub impact: ImpactAssumptions,

    /// Custom shock drivers, replacing the default registry
    #[serde(default)]
    pub shock_drivers: Option<Vec<ShockDriver>>,

    /// Custom scenario multiplier table
    #[serde(default)]
    pub scenario_table: Option<ScenarioTable>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            simulation: SimulationSection::default(),
            scenarios: default_scenarios(),
            impact: ImpactAssumptions::default(),
            shock_drivers: None,
            scenario_table: None,
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`, or the defaults if it does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Reads `ADOPTION_PATHS`, `ADOPTION_HORIZON`, `ADOPTION_SEED` and
    /// `ADOPTION_LOG_LEVEL`. Unparseable numbers are reported as
    /// validation errors.
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();

        if let Some(paths) = env_number("ADOPTION_PATHS", &mut errors) {
            self.simulation.num_paths = paths;
        }

        if let Some(horizon) = env_number("ADOPTION_HORIZON", &mut errors) {
            self.simulation.time_horizon = horizon;
        }

        if let Some(seed) = env_number("ADOPTION_SEED", &mut errors) {
            self.simulation.seed = seed;
        }

        if let Ok(log_level) = std::env::var("ADOPTION_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        paths: Option<usize>,
        horizon: Option<usize>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(paths) = paths {
            self.simulation.num_paths = paths;
        }
        if let Some(horizon) = horizon {
            self.simulation.time_horizon = horizon;
        }
        if let Some(seed) = seed {
            self.simulation.seed = seed;
        }
        self
    }

    /// Validate the configuration
    ///
    /// Builds the parameter set, engine configuration and every scenario,
    /// resolving each against the multiplier table and checking that it can
    /// be simulated from the configured initial rates, and reports all
    /// problems together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        let params = match self.to_parameter_set() {
            Ok(params) => Some(params),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        let engine = match self.to_engine_config() {
            Ok(engine) => Some(engine),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        let simulator = match (params, &engine) {
            (Some(params), Some(engine)) => match ScenarioSimulator::new(params, engine.clone()) {
                Ok(simulator) => Some(simulator),
                Err(e) => {
                    errors.push(e.to_string());
                    None
                }
            },
            _ => None,
        };

        if self.scenarios.is_empty() {
            errors.push("At least one scenario must be configured".to_string());
        }

        let mut seen = BTreeSet::new();
        for entry in &self.scenarios {
            match entry.to_selector() {
                Ok(selector) => {
                    if !seen.insert(selector.kind()) {
                        errors.push(format!("Scenario '{}' listed more than once", entry.name));
                    }
                    let checked = match (&simulator, &engine) {
                        (Some(simulator), _) => simulator
                            .resolve(&selector)
                            .and_then(|m| simulator.check_feasible(&m)),
                        (None, Some(engine)) => engine
                            .table()
                            .resolve(&selector)
                            .map(|_| ())
                            .map_err(EngineError::from),
                        (None, None) => Ok(()),
                    };
                    if let Err(e) = checked {
                        errors.push(format!("Scenario '{}': {}", entry.name, e));
                    }
                }
                Err(e) => errors.push(e.to_string()),
            }
        }

        let impact = [
            ("gdp_multiplier", self.impact.gdp_multiplier),
            ("jobs_per_unit", self.impact.jobs_per_unit),
            ("productivity_multiplier", self.impact.productivity_multiplier),
        ];
        for (name, value) in impact {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!(
                    "Impact assumption {} must be finite and non-negative, got {}",
                    name, value
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Build the validated parameter set
    pub fn to_parameter_set(&self) -> Result<ParameterSet, EngineError> {
        let sim = &self.simulation;
        let builder = ParameterSet::builder()
            .time_horizon(sim.time_horizon)
            .num_paths(sim.num_paths)
            .initial_market_size(sim.initial_market_size)
            .base_growth_rate(sim.base_growth_rate)
            .volatility(sim.volatility)
            .adoption_rate(Segment::Sme, sim.initial_adoption.sme)
            .adoption_rate(Segment::Large, sim.initial_adoption.large)
            .bass(sim.bass)
            .segment_weights(sim.segment_weights);
        Ok(builder.build()?)
    }

    /// Build the engine configuration
    pub fn to_engine_config(&self) -> Result<EngineConfig, EngineError> {
        let sim = &self.simulation;
        let mut builder = EngineConfig::builder()
            .seed(sim.seed)
            .parallel_threshold(sim.parallel_threshold)
            .retain_paths(sim.retain_paths);
        if let Some(drivers) = &self.shock_drivers {
            builder = builder.registry(ShockRegistry::new(drivers.clone())?);
        }
        if let Some(table) = &self.scenario_table {
            builder = builder.table(table.clone());
        }
        builder.build()
    }

    /// Configured scenarios, in order
    pub fn selectors(&self) -> Result<Vec<ScenarioSelector>, EngineError> {
        self.scenarios.iter().map(ScenarioEntry::to_selector).collect()
    }
}

fn env_number<T: std::str::FromStr>(name: &str, errors: &mut Vec<String>) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(format!("{} must be a non-negative integer, got '{}'", name, value));
            None
        }
    }
}
