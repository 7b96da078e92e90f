//! # adoption_engine (L3: Engine)
//!
//! Monte Carlo scenario simulation of technology adoption.
//!
//! ## Module Structure
//!
//! - [`rng`]: seeded per-path generators and seed partitioning
//! - [`mc`]: engine configuration, shock matrices, scenario simulator
//! - [`stats`]: per-year ensemble statistics
//! - [`analysis`]: multi-scenario runner and result types
//! - [`report`]: economic impact, policy recommendations, export document
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        adoption_cli (S: Service)            │
//! └─────────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────────┐
//! │        adoption_engine (L3)                 │
//! ├─────────────────────────────────────────────┤
//! │  rng/      - PathRng, derive_path_seed      │
//! │  mc/       - ShockMatrix, ScenarioSimulator │
//! │  stats/    - StatisticsAggregator           │
//! │  analysis/ - run_analysis, AnalysisReport   │
//! │  report/   - impact, recommendations        │
//! └─────────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────────┐
//! │   adoption_models (L2) / adoption_core (L1) │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Every path draws from its own generator, seeded from the run seed, the
//! scenario kind and the path index. Results are bit-identical across
//! runs and thread counts for the same configuration.
//!
//! ## Example
//!
//! ```rust
//! use adoption_core::types::ParameterSet;
//! use adoption_engine::mc::{EngineConfig, ScenarioSimulator};
//! use adoption_models::scenarios::{ScenarioKind, ScenarioSelector};
//!
//! let params = ParameterSet::builder().num_paths(200).build().unwrap();
//! let config = EngineConfig::builder().seed(2024).build().unwrap();
//! let simulator = ScenarioSimulator::new(params, config).unwrap();
//!
//! let report = simulator.run_standard_analysis().unwrap();
//! let baseline = report.get(ScenarioKind::Baseline).unwrap();
//! let final_overall = baseline.statistics.overall_adoption.final_year().unwrap();
//! assert!(final_overall.p5 <= final_overall.p95);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analysis;
pub mod error;
pub mod mc;
pub mod report;
pub mod rng;
pub mod stats;

pub use analysis::{AnalysisReport, ScenarioResult};
pub use error::{EngineError, Result};
pub use mc::{EngineConfig, ScenarioSimulator, ShockMatrix, SimulationPath, YearState};
pub use stats::{ScenarioStatistics, SeriesStatistics, StatisticsAggregator};
