//! Core parameter and identifier types.
//!
//! This module provides:
//! - `params`: [`ParameterSet`] and its builder, Bass coefficients and segment weights
//! - `segment`: [`Segment`] and [`Series`] identifiers
//! - `error`: [`ParameterError`] for parameter validation
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod error;
pub mod params;
pub mod segment;

pub use error::ParameterError;
pub use params::{
    BassCoefficients, ParameterSet, ParameterSetBuilder, SegmentWeights, MAX_PATHS,
    MAX_TIME_HORIZON,
};
pub use segment::{Segment, Series};
