//! Ensemble statistics.
//!
//! Per year and series: mean, median, p5/p25/p75/p95 and population
//! standard deviation (plus the sample range).

mod aggregator;

pub use aggregator::{ScenarioStatistics, SeriesStatistics, StatisticsAggregator};
