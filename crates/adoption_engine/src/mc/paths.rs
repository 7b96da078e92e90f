//! Simulation path representation.

use adoption_core::types::{ParameterSet, Segment, Series};
use serde::Serialize;

/// Snapshot of one path in one year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct YearState {
    /// Year index, 0 for the initial conditions.
    pub year: usize,
    /// Market size.
    pub market_size: f64,
    /// SME adoption fraction.
    pub sme_adoption: f64,
    /// Large enterprise adoption fraction.
    pub large_adoption: f64,
    /// Population-weighted overall adoption fraction.
    pub overall_adoption: f64,
}

impl YearState {
    /// Year-0 state taken from the parameter set.
    pub fn initial(params: &ParameterSet) -> Self {
        Self {
            year: 0,
            market_size: params.initial_market_size(),
            sme_adoption: params.initial_adoption(Segment::Sme),
            large_adoption: params.initial_adoption(Segment::Large),
            overall_adoption: params.initial_overall_adoption(),
        }
    }

    /// Adoption of one segment.
    #[inline]
    pub fn adoption(&self, segment: Segment) -> f64 {
        match segment {
            Segment::Sme => self.sme_adoption,
            Segment::Large => self.large_adoption,
        }
    }

    /// Segment adoptions indexed by [`Segment::index`].
    #[inline]
    pub fn segment_adoption(&self) -> [f64; Segment::COUNT] {
        [self.sme_adoption, self.large_adoption]
    }

    /// Whether every tracked value is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.market_size.is_finite()
            && self.sme_adoption.is_finite()
            && self.large_adoption.is_finite()
            && self.overall_adoption.is_finite()
    }

    /// Value of one tracked series.
    #[inline]
    pub fn value(&self, series: Series) -> f64 {
        match series {
            Series::MarketSize => self.market_size,
            Series::SmeAdoption => self.sme_adoption,
            Series::LargeAdoption => self.large_adoption,
            Series::OverallAdoption => self.overall_adoption,
        }
    }
}

/// One simulated trajectory: `time_horizon + 1` snapshots, year 0 first.
///
/// Snapshots are appended strictly forward and never rewritten.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimulationPath {
    states: Vec<YearState>,
}

impl SimulationPath {
    pub(crate) fn with_capacity(initial: YearState, n_years: usize) -> Self {
        let mut states = Vec::with_capacity(n_years + 1);
        states.push(initial);
        Self { states }
    }

    pub(crate) fn push(&mut self, state: YearState) {
        self.states.push(state);
    }

    /// All snapshots in year order.
    #[inline]
    pub fn states(&self) -> &[YearState] {
        &self.states
    }

    /// Number of snapshots.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the path holds no snapshots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Snapshot of year `year`.
    #[inline]
    pub fn year(&self, year: usize) -> Option<&YearState> {
        self.states.get(year)
    }

    /// Last snapshot.
    #[inline]
    pub fn final_state(&self) -> Option<&YearState> {
        self.states.last()
    }

    /// Year-indexed values of one series.
    pub fn series(&self, series: Series) -> Vec<f64> {
        self.states.iter().map(|s| s.value(series)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_from_params() {
        let params = ParameterSet::default();
        let state = YearState::initial(&params);
        assert_eq!(state.year, 0);
        assert_eq!(state.market_size, 7.56);
        assert_eq!(state.adoption(Segment::Sme), 0.16);
        assert_eq!(state.adoption(Segment::Large), 0.42);
        assert_eq!(state.value(Series::OverallAdoption), 0.7 * 0.16 + 0.3 * 0.42);
    }

    #[test]
    fn test_path_series() {
        let params = ParameterSet::default();
        let initial = YearState::initial(&params);
        let mut path = SimulationPath::with_capacity(initial, 1);
        path.push(YearState {
            year: 1,
            market_size: 9.0,
            ..initial
        });
        assert_eq!(path.len(), 2);
        assert_eq!(path.series(Series::MarketSize), vec![7.56, 9.0]);
        assert_eq!(path.final_state().map(|s| s.year), Some(1));
        assert!(path.year(2).is_none());
    }
}
