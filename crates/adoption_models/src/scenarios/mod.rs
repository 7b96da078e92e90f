//! Scenario definitions and multiplier resolution.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 Scenario Resolver                 │
//! ├──────────────────────────────────────────────────┤
//! │  ScenarioSelector   - tagged scenario choice     │
//! │  PolicyEffects      - named policy magnitudes    │
//! │  ScenarioTable      - multiplier table + resolve │
//! │  ScenarioMultipliers- resolved plain record      │
//! └──────────────────────────────────────────────────┘
//! ```

mod error;
mod multipliers;
mod selector;
mod table;

pub use error::ScenarioError;
pub use multipliers::{ScenarioMultipliers, SegmentMultipliers};
pub use selector::{PolicyEffects, ScenarioKind, ScenarioSelector, OVERALL_BOOST, SME_SUPPORT};
pub use table::{ScenarioTable, POLICY_POTENTIAL_SENSITIVITY};
