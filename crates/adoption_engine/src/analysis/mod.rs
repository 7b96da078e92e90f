//! Multi-scenario analysis.
//!
//! [`ScenarioSimulator::run_analysis`](crate::mc::ScenarioSimulator::run_analysis)
//! resolves every selector up front, simulates the scenarios in parallel and
//! collects one [`ScenarioResult`] per scenario into an [`AnalysisReport`].

mod result;
mod runner;

pub use result::{AnalysisReport, ScenarioResult};
