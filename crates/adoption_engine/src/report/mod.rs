//! Post-processing of analysis results.
//!
//! Read-only consumers of [`ScenarioStatistics`](crate::stats::ScenarioStatistics):
//!
//! - [`impact`]: final-year economic impact
//! - [`recommendations`]: baseline vs policy comparison
//! - [`export`]: JSON document and flat statistics rows

pub mod export;
pub mod impact;
pub mod recommendations;

pub use export::{ExportDocument, ScenarioExport, StatisticsRow};
pub use impact::{EconomicImpact, ImpactAssumptions};
pub use recommendations::{compare_impacts, recommend, Priority, Recommendation};
