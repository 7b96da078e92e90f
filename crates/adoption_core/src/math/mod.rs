//! Numerical helpers.
//!
//! - `statistics`: sample mean, population standard deviation and
//!   linearly interpolated percentiles

pub mod statistics;

pub use statistics::{mean, percentile_sorted, population_std, SampleSummary};
