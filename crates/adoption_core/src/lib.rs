//! # adoption_core: Foundation Types for the Adoption Simulator
//!
//! ## Layer 1 (Foundation) Role
//!
//! adoption_core is the bottom layer of the workspace, providing:
//! - The immutable simulation parameter set (`types::params`)
//! - Segment and series identifiers (`types::segment`)
//! - Parameter validation errors (`types::error`)
//! - Sample statistics used by the aggregator (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other adoption_* crates, with minimal external
//! dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation of parameters for exports
//!
//! ## Usage Examples
//!
//! ```rust
//! use adoption_core::types::{ParameterSet, Segment};
//!
//! let params = ParameterSet::builder()
//!     .time_horizon(6)
//!     .num_paths(500)
//!     .adoption_rate(Segment::Sme, 0.16)
//!     .adoption_rate(Segment::Large, 0.42)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.time_horizon(), 6);
//! assert_eq!(params.initial_adoption(Segment::Large), 0.42);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
