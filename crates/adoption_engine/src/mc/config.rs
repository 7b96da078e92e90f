//! Engine configuration.
//!
//! Holds everything the engine needs beyond the [`ParameterSet`]: the run
//! seed, the shock driver registry, the scenario multiplier table and
//! execution options.
//!
//! [`ParameterSet`]: adoption_core::types::ParameterSet

use adoption_models::scenarios::ScenarioTable;
use adoption_models::shocks::ShockRegistry;

use crate::error::EngineError;

/// Default run seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default minimum path count before paths are evaluated in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Engine configuration.
///
/// # Examples
///
/// ```rust
/// use adoption_engine::mc::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .seed(7)
///     .retain_paths(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.seed(), 7);
/// assert!(config.retain_paths());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    seed: u64,
    parallel_threshold: usize,
    retain_paths: bool,
    registry: ShockRegistry,
    table: ScenarioTable,
}

impl EngineConfig {
    /// Creates a builder with default settings.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Run seed from which every path seed is derived.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Minimum path count for parallel evaluation.
    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Whether raw paths are kept in scenario results.
    #[inline]
    pub fn retain_paths(&self) -> bool {
        self.retain_paths
    }

    /// Shock driver registry at reference volatility.
    #[inline]
    pub fn registry(&self) -> &ShockRegistry {
        &self.registry
    }

    /// Scenario multiplier table.
    #[inline]
    pub fn table(&self) -> &ScenarioTable {
        &self.table
    }

    /// Whether `n_paths` paths should be evaluated in parallel.
    #[inline]
    pub fn should_parallelize(&self, n_paths: usize) -> bool {
        n_paths >= self.parallel_threshold
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            retain_paths: false,
            registry: ShockRegistry::default(),
            table: ScenarioTable::default(),
        }
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    seed: Option<u64>,
    parallel_threshold: Option<usize>,
    retain_paths: bool,
    registry: Option<ShockRegistry>,
    table: Option<ScenarioTable>,
}

impl EngineConfigBuilder {
    /// Sets the run seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the minimum path count for parallel evaluation.
    ///
    /// `usize::MAX` forces sequential evaluation; `0` always parallelises.
    #[inline]
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Keeps raw paths in scenario results.
    #[inline]
    pub fn retain_paths(mut self, retain: bool) -> Self {
        self.retain_paths = retain;
        self
    }

    /// Replaces the shock driver registry.
    #[inline]
    pub fn registry(mut self, registry: ShockRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replaces the scenario multiplier table.
    #[inline]
    pub fn table(mut self, table: ScenarioTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Registry` if the shock registry is invalid.
    pub fn build(self) -> Result<EngineConfig, EngineError> {
        let registry = self.registry.unwrap_or_default();
        registry.validate()?;
        Ok(EngineConfig {
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
            retain_paths: self.retain_paths,
            registry,
            table: self.table.unwrap_or_default(),
        })
    }
}
