//! # adoption_models (L2: Models)
//!
//! Stateless model components of the adoption simulator:
//!
//! - `diffusion`: discrete-time Bass diffusion increment
//! - `shocks`: shock driver registry and AR(1) driver combination
//! - `scenarios`: scenario selectors, policy effects and the multiplier table
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          adoption_engine (L3)           │
//! │   shock generation, path evolution,     │
//! │   ensemble statistics                   │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │          adoption_models (L2)           │
//! ├─────────────────────────────────────────┤
//! │  diffusion/  - BassDiffusion            │
//! │  shocks/     - ShockDriver, Registry    │
//! │  scenarios/  - Selector, ScenarioTable  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           adoption_core (L1)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use adoption_core::types::{BassCoefficients, Segment};
//! use adoption_models::scenarios::{PolicyEffects, ScenarioSelector, ScenarioTable};
//!
//! let table = ScenarioTable::default();
//! let policy = ScenarioSelector::PolicyIntervention(
//!     PolicyEffects::new().with("sme_support", 0.15).with("overall_boost", 0.05),
//! );
//!
//! let baseline = table.resolve(&ScenarioSelector::Baseline).unwrap();
//! let boosted = table.resolve(&policy).unwrap();
//! assert!(boosted.market_growth > baseline.market_growth);
//!
//! let sme = boosted.diffusion(Segment::Sme, BassCoefficients::default());
//! assert!(sme.increment(0.16) > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod diffusion;
pub mod scenarios;
pub mod shocks;

pub use diffusion::{bass_increment, BassDiffusion};
pub use scenarios::{
    PolicyEffects, ScenarioError, ScenarioKind, ScenarioMultipliers, ScenarioSelector,
    ScenarioTable, SegmentMultipliers,
};
pub use shocks::{RegistryError, ShockDriver, ShockRegistry};
