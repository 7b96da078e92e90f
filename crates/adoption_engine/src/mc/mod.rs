//! # Monte Carlo Simulation
//!
//! ## Module Structure
//!
//! - [`config`]: engine configuration (seed, registry, multiplier table)
//! - [`shocks`]: shock matrix generation
//! - [`paths`]: per-year snapshots and simulation paths
//! - [`simulator`]: scenario simulator
//!
//! ## Pipeline
//!
//! ```text
//! ScenarioSelector ──resolve──▶ ScenarioMultipliers ─┐
//!                                                    ├─ evolve ─▶ Vec<SimulationPath>
//! (seed, kind, path) ──generate──▶ ShockMatrix ──────┘
//! ```

pub mod config;
pub mod paths;
pub mod shocks;
pub mod simulator;

pub use config::{EngineConfig, EngineConfigBuilder, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_SEED};
pub use paths::{SimulationPath, YearState};
pub use shocks::ShockMatrix;
pub use simulator::ScenarioSimulator;
