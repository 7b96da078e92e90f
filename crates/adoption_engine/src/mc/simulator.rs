//! Scenario simulator.
//!
//! Per path, starting from the year-0 parameter values:
//! ```text
//! market[t]  = market[t-1] * (1 + g) * shock[t-1] * market_growth
//! adopt_s[t] = min(adopt_s[t-1] + bass_s(adopt_s[t-1]) * shock[t-1], m_s)
//! overall[t] = w_sme * adopt_sme[t] + w_large * adopt_large[t]
//! ```

use adoption_core::types::{ParameterSet, Segment, SegmentWeights};
use adoption_models::diffusion::BassDiffusion;
use adoption_models::scenarios::{ScenarioKind, ScenarioMultipliers, ScenarioSelector};
use adoption_models::shocks::{ShockRegistry, AR_PERSISTENCE};
use rayon::prelude::*;
use tracing::debug;

use super::config::EngineConfig;
use super::paths::{SimulationPath, YearState};
use super::shocks::ShockMatrix;
use crate::error::{EngineError, Result};

/// Shock standard deviations allowed for in the market size bound.
const MARKET_BOUND_SIGMAS: f64 = 8.0;

/// Monte Carlo simulator for one parameter set.
///
/// # Examples
///
/// ```rust
/// use adoption_core::types::ParameterSet;
/// use adoption_engine::mc::{EngineConfig, ScenarioSimulator};
/// use adoption_models::scenarios::ScenarioSelector;
///
/// let params = ParameterSet::builder().num_paths(200).build().unwrap();
/// let simulator = ScenarioSimulator::new(params, EngineConfig::default()).unwrap();
///
/// let paths = simulator.simulate(&ScenarioSelector::Baseline).unwrap();
/// assert_eq!(paths.len(), 200);
/// assert_eq!(paths[0].len(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioSimulator {
    params: ParameterSet,
    config: EngineConfig,
    registry: ShockRegistry,
}

impl ScenarioSimulator {
    /// Creates a simulator.
    ///
    /// The shock registry is rescaled once by the parameter set's
    /// volatility relative to the reference level.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if the parameter set or the registry is invalid.
    pub fn new(params: ParameterSet, config: EngineConfig) -> Result<Self> {
        params.validate()?;
        config.registry().validate()?;
        let registry = config.registry().scaled(params.volatility_scale());
        Ok(Self {
            params,
            config,
            registry,
        })
    }

    /// Parameter set.
    #[inline]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Engine configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shock registry at the run's volatility level.
    #[inline]
    pub fn registry(&self) -> &ShockRegistry {
        &self.registry
    }

    /// Resolves a selector against the engine's multiplier table.
    pub fn resolve(&self, selector: &ScenarioSelector) -> Result<ScenarioMultipliers> {
        Ok(self.config.table().resolve(selector)?)
    }

    /// Shock matrix of one scenario: `num_paths × time_horizon`.
    pub fn generate_shocks(&self, kind: ScenarioKind) -> ShockMatrix {
        let n_paths = self.params.num_paths();
        ShockMatrix::generate(
            &self.registry,
            n_paths,
            self.params.time_horizon(),
            self.config.seed(),
            kind.seed_tag(),
            self.config.should_parallelize(n_paths),
        )
    }

    /// Simulates every path of one scenario.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Scenario` if the selector cannot be resolved, or
    /// a [`check_feasible`](Self::check_feasible) error. Nothing is simulated
    /// in either case.
    pub fn simulate(&self, selector: &ScenarioSelector) -> Result<Vec<SimulationPath>> {
        let multipliers = self.resolve(selector)?;
        self.check_feasible(&multipliers)?;
        let shocks = self.generate_shocks(selector.kind());
        debug!(
            scenario = %selector,
            n_paths = shocks.n_paths(),
            n_years = shocks.n_years(),
            "Generated shock matrix"
        );
        self.evolve(&multipliers, &shocks)
    }

    /// Evolves one path per shock row under fixed multipliers.
    ///
    /// Pure in its inputs: the same multipliers and shocks always give the
    /// same paths, whatever the thread count.
    ///
    /// # Errors
    ///
    /// - `ShockShape` if the matrix does not have `time_horizon` columns
    /// - `Scenario` if the multipliers fail validation
    /// - `InitialAbovePotential` or `MarketSizeOverflow` from
    ///   [`check_feasible`](Self::check_feasible)
    /// - `NonFiniteState` if an injected shock drives the market out of range
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adoption_core::types::ParameterSet;
    /// use adoption_engine::mc::{EngineConfig, ScenarioSimulator, ShockMatrix};
    /// use adoption_models::scenarios::ScenarioSelector;
    ///
    /// let params = ParameterSet::builder().time_horizon(3).num_paths(4).build().unwrap();
    /// let simulator = ScenarioSimulator::new(params, EngineConfig::default()).unwrap();
    /// let multipliers = simulator.resolve(&ScenarioSelector::Baseline).unwrap();
    ///
    /// let flat = ShockMatrix::constant(4, 3, 1.0);
    /// let paths = simulator.evolve(&multipliers, &flat).unwrap();
    /// assert_eq!(paths[0], paths[3]);
    /// ```
    pub fn evolve(
        &self,
        multipliers: &ScenarioMultipliers,
        shocks: &ShockMatrix,
    ) -> Result<Vec<SimulationPath>> {
        let horizon = self.params.time_horizon();
        if shocks.n_years() != horizon {
            return Err(EngineError::ShockShape {
                expected: horizon,
                found: shocks.n_years(),
            });
        }
        multipliers.validate()?;
        self.check_feasible(multipliers)?;

        let kernel = PathKernel::new(&self.params, multipliers);
        let n_paths = shocks.n_paths();
        let paths: Vec<SimulationPath> = if self.config.should_parallelize(n_paths) {
            (0..n_paths)
                .into_par_iter()
                .map(|path| kernel.evolve(shocks.row(path)))
                .collect()
        } else {
            (0..n_paths)
                .map(|path| kernel.evolve(shocks.row(path)))
                .collect()
        };

        for (index, path) in paths.iter().enumerate() {
            if let Some(state) = path.states().iter().find(|s| !s.is_finite()) {
                return Err(EngineError::NonFiniteState {
                    path: index,
                    year: state.year,
                });
            }
        }
        Ok(paths)
    }

    /// Checks that a scenario can be simulated under this parameter set.
    ///
    /// Every year-0 segment rate must lie within the scenario's potential.
    /// The market size, compounded at the scenario's growth over the horizon
    /// plus an 8-sigma margin on the cumulative log-shock, must stay small
    /// enough for the ensemble mean and variance to remain finite.
    ///
    /// # Errors
    ///
    /// - `InitialAbovePotential` for the first segment starting above its potential
    /// - `MarketSizeOverflow` if the market bound leaves the finite range
    pub fn check_feasible(&self, multipliers: &ScenarioMultipliers) -> Result<()> {
        for segment in Segment::ALL {
            let initial = self.params.initial_adoption(segment);
            let potential = multipliers.potential(segment);
            if initial > potential {
                return Err(EngineError::InitialAbovePotential {
                    segment,
                    initial,
                    potential,
                });
            }
        }

        let horizon = self.params.time_horizon() as f64;
        let growth_factor = (1.0 + self.params.base_growth_rate()) * multipliers.market_growth;
        // Weighted driver volatilities bound the yearly log-shock spread. The
        // AR(1) start year carries through 1 / (1 - 0.7) years of persistence.
        let shock_sd: f64 = self
            .registry
            .drivers()
            .iter()
            .map(|d| d.weight * d.volatility)
            .sum();
        let cumulative_sd = shock_sd * (horizon.sqrt() + 1.0 / (1.0 - AR_PERSISTENCE));
        let log_peak = self.params.initial_market_size().ln()
            + horizon * growth_factor.ln().max(0.0)
            + MARKET_BOUND_SIGMAS * cumulative_sd;
        // Squared deviations in the variance must stay finite across all paths.
        let limit = 0.5 * (f64::MAX.ln() - (self.params.num_paths() as f64).ln());
        if !log_peak.is_finite() || log_peak >= limit {
            return Err(EngineError::MarketSizeOverflow { log_peak, limit });
        }
        Ok(())
    }
}

/// Per-scenario constants of the year step.
struct PathKernel {
    initial: YearState,
    growth_factor: f64,
    diffusion: [BassDiffusion; Segment::COUNT],
    weights: SegmentWeights,
}

impl PathKernel {
    fn new(params: &ParameterSet, multipliers: &ScenarioMultipliers) -> Self {
        let bass = params.bass();
        Self {
            initial: YearState::initial(params),
            growth_factor: (1.0 + params.base_growth_rate()) * multipliers.market_growth,
            diffusion: Segment::ALL.map(|segment| multipliers.diffusion(segment, bass)),
            weights: params.segment_weights(),
        }
    }

    fn evolve(&self, shocks: &[f64]) -> SimulationPath {
        let mut path = SimulationPath::with_capacity(self.initial, shocks.len());
        let mut previous = self.initial;
        for (t, &shock) in shocks.iter().enumerate() {
            let adoption = Segment::ALL.map(|segment| {
                self.diffusion[segment.index()].step(previous.adoption(segment), shock)
            });
            let state = YearState {
                year: t + 1,
                market_size: previous.market_size * self.growth_factor * shock,
                sme_adoption: adoption[Segment::Sme.index()],
                large_adoption: adoption[Segment::Large.index()],
                overall_adoption: self.weights.blend(&adoption),
            };
            path.push(state);
            previous = state;
        }
        path
    }
}
