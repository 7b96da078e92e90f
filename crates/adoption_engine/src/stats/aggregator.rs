//! Ensemble statistics aggregator.
//!
//! Reduces the `n_paths × (T + 1)` matrix of each series to per-year
//! distribution summaries. Columns are independent and are reduced in
//! parallel.

use adoption_core::math::SampleSummary;
use adoption_core::types::Series;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::mc::SimulationPath;

/// Year-indexed statistics of one series.
///
/// Every vector has one entry per year, year 0 first.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SeriesStatistics {
    /// Mean.
    pub mean: Vec<f64>,
    /// Median.
    pub median: Vec<f64>,
    /// 5th percentile.
    pub p5: Vec<f64>,
    /// 25th percentile.
    pub p25: Vec<f64>,
    /// 75th percentile.
    pub p75: Vec<f64>,
    /// 95th percentile.
    pub p95: Vec<f64>,
    /// Population standard deviation.
    pub std: Vec<f64>,
    /// Smallest path value.
    pub min: Vec<f64>,
    /// Largest path value.
    pub max: Vec<f64>,
}

impl SeriesStatistics {
    fn from_summaries(summaries: &[SampleSummary]) -> Self {
        let collect = |f: fn(&SampleSummary) -> f64| summaries.iter().map(f).collect();
        Self {
            mean: collect(|s| s.mean),
            median: collect(|s| s.median),
            p5: collect(|s| s.p5),
            p25: collect(|s| s.p25),
            p75: collect(|s| s.p75),
            p95: collect(|s| s.p95),
            std: collect(|s| s.std),
            min: collect(|s| s.min),
            max: collect(|s| s.max),
        }
    }

    /// Number of years covered, including year 0.
    #[inline]
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Whether no year is covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Summary of one year.
    pub fn at(&self, year: usize) -> Option<SampleSummary> {
        Some(SampleSummary {
            mean: *self.mean.get(year)?,
            median: *self.median.get(year)?,
            p5: *self.p5.get(year)?,
            p25: *self.p25.get(year)?,
            p75: *self.p75.get(year)?,
            p95: *self.p95.get(year)?,
            std: *self.std.get(year)?,
            min: *self.min.get(year)?,
            max: *self.max.get(year)?,
        })
    }

    /// Summary of the final year.
    pub fn final_year(&self) -> Option<SampleSummary> {
        self.len().checked_sub(1).and_then(|year| self.at(year))
    }
}

/// Per-series statistics of one scenario.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScenarioStatistics {
    /// Market size.
    pub market_size: SeriesStatistics,
    /// SME adoption.
    pub sme_adoption: SeriesStatistics,
    /// Large enterprise adoption.
    pub large_adoption: SeriesStatistics,
    /// Overall adoption.
    pub overall_adoption: SeriesStatistics,
}

impl ScenarioStatistics {
    /// Statistics of one series.
    pub fn series(&self, series: Series) -> &SeriesStatistics {
        match series {
            Series::MarketSize => &self.market_size,
            Series::SmeAdoption => &self.sme_adoption,
            Series::LargeAdoption => &self.large_adoption,
            Series::OverallAdoption => &self.overall_adoption,
        }
    }

    /// Iterates over `(series, statistics)` in export order.
    pub fn iter(&self) -> impl Iterator<Item = (Series, &SeriesStatistics)> {
        Series::ALL.into_iter().map(move |s| (s, self.series(s)))
    }

    /// Number of years covered, including year 0.
    pub fn n_years(&self) -> usize {
        self.market_size.len()
    }
}

/// Ensemble statistics aggregator.
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    /// Aggregates a complete ensemble.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyEnsemble` if `paths` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adoption_core::types::ParameterSet;
    /// use adoption_engine::mc::{EngineConfig, ScenarioSimulator};
    /// use adoption_engine::stats::StatisticsAggregator;
    /// use adoption_models::scenarios::ScenarioSelector;
    ///
    /// let params = ParameterSet::builder().num_paths(100).build().unwrap();
    /// let simulator = ScenarioSimulator::new(params, EngineConfig::default()).unwrap();
    /// let paths = simulator.simulate(&ScenarioSelector::Baseline).unwrap();
    ///
    /// let stats = StatisticsAggregator::aggregate(&paths).unwrap();
    /// assert_eq!(stats.n_years(), 7);
    /// assert_eq!(stats.market_size.std[0], 0.0);
    /// ```
    pub fn aggregate(paths: &[SimulationPath]) -> Result<ScenarioStatistics> {
        let n_years = paths
            .iter()
            .map(SimulationPath::len)
            .min()
            .ok_or(EngineError::EmptyEnsemble)?;
        Ok(ScenarioStatistics {
            market_size: Self::series(paths, Series::MarketSize, n_years)?,
            sme_adoption: Self::series(paths, Series::SmeAdoption, n_years)?,
            large_adoption: Self::series(paths, Series::LargeAdoption, n_years)?,
            overall_adoption: Self::series(paths, Series::OverallAdoption, n_years)?,
        })
    }

    fn series(paths: &[SimulationPath], series: Series, n_years: usize) -> Result<SeriesStatistics> {
        let summaries: Option<Vec<SampleSummary>> = (0..n_years)
            .into_par_iter()
            .map(|t| {
                let column = paths.iter().map(|p| p.states()[t].value(series)).collect();
                SampleSummary::from_samples(column)
            })
            .collect();
        let summaries = summaries.ok_or(EngineError::EmptyEnsemble)?;
        Ok(SeriesStatistics::from_summaries(&summaries))
    }
}
