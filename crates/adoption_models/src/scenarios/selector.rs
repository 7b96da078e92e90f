//! Scenario selectors and policy effects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::ScenarioError;

/// Policy effect raising SME innovation and the SME potential.
pub const SME_SUPPORT: &str = "sme_support";

/// Policy effect raising overall market growth.
pub const OVERALL_BOOST: &str = "overall_boost";

/// Scenario kind without payload.
///
/// # Examples
///
/// ```
/// use adoption_models::scenarios::ScenarioKind;
///
/// let kind: ScenarioKind = "policy_intervention".parse().unwrap();
/// assert_eq!(kind, ScenarioKind::PolicyIntervention);
/// assert!("moonshot".parse::<ScenarioKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Reference assumptions.
    Baseline,
    /// Faster diffusion and growth.
    Optimistic,
    /// Slower diffusion and growth.
    Pessimistic,
    /// Baseline adjusted by policy effects.
    PolicyIntervention,
    /// Uneven diffusion led by large enterprises.
    Disruption,
}

impl ScenarioKind {
    /// All kinds in canonical order.
    pub const ALL: [ScenarioKind; 5] = [
        ScenarioKind::Baseline,
        ScenarioKind::Optimistic,
        ScenarioKind::Pessimistic,
        ScenarioKind::PolicyIntervention,
        ScenarioKind::Disruption,
    ];

    /// Identifier used in configuration and exports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Optimistic => "optimistic",
            Self::Pessimistic => "pessimistic",
            Self::PolicyIntervention => "policy_intervention",
            Self::Disruption => "disruption",
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Baseline => "Reference diffusion and growth assumptions",
            Self::Optimistic => "Faster diffusion, higher ceilings and growth",
            Self::Pessimistic => "Slower diffusion, lower ceilings and growth",
            Self::PolicyIntervention => "Baseline with SME support and growth policy effects",
            Self::Disruption => "Large enterprises lead, SMEs follow by imitation",
        }
    }

    /// Stable per-kind tag mixed into path seeds.
    #[inline]
    pub fn seed_tag(self) -> u64 {
        match self {
            Self::Baseline => 1,
            Self::Optimistic => 2,
            Self::Pessimistic => 3,
            Self::PolicyIntervention => 4,
            Self::Disruption => 5,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalised)
            .ok_or_else(|| ScenarioError::UnknownScenario(s.to_string()))
    }
}

/// Named policy-effect magnitudes.
///
/// # Examples
///
/// ```
/// use adoption_models::scenarios::PolicyEffects;
///
/// let effects = PolicyEffects::new()
///     .with("sme_support", 0.15)
///     .with("overall_boost", 0.05);
/// assert_eq!(effects.get("sme_support"), Some(0.15));
/// assert_eq!(effects.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyEffects(BTreeMap<String, f64>);

impl PolicyEffects {
    /// Creates an empty set of effects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an effect.
    pub fn with(mut self, name: impl Into<String>, magnitude: f64) -> Self {
        self.0.insert(name.into(), magnitude);
        self
    }

    /// Magnitude of an effect.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Magnitude of an effect the caller cannot do without.
    pub fn require(&self, name: &'static str) -> Result<f64, ScenarioError> {
        self.get(name).ok_or(ScenarioError::MissingPolicyEffect(name))
    }

    /// Iterates over `(name, magnitude)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of effects.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no effects are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks keys and magnitudes.
    ///
    /// # Errors
    ///
    /// - `UnknownPolicyEffect` for keys other than `sme_support` / `overall_boost`
    /// - `NonFinitePolicyEffect` for NaN or infinite magnitudes
    /// - `MissingPolicyEffect` when either known key is absent
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (name, value) in self.iter() {
            if name != SME_SUPPORT && name != OVERALL_BOOST {
                return Err(ScenarioError::UnknownPolicyEffect(name.to_string()));
            }
            if !value.is_finite() {
                return Err(ScenarioError::NonFinitePolicyEffect {
                    name: name.to_string(),
                    value,
                });
            }
        }
        self.require(SME_SUPPORT)?;
        self.require(OVERALL_BOOST)?;
        Ok(())
    }
}

impl From<BTreeMap<String, f64>> for PolicyEffects {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self(map)
    }
}

/// Scenario to simulate.
///
/// The policy scenario carries its effect magnitudes; the other kinds are
/// fully described by the multiplier table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "policy_effects", rename_all = "snake_case")]
pub enum ScenarioSelector {
    /// Reference assumptions.
    Baseline,
    /// Faster diffusion and growth.
    Optimistic,
    /// Slower diffusion and growth.
    Pessimistic,
    /// Baseline adjusted by policy effects.
    PolicyIntervention(PolicyEffects),
    /// Uneven diffusion led by large enterprises.
    Disruption,
}

impl ScenarioSelector {
    /// Builds a selector from a kind name and optional effects.
    ///
    /// # Errors
    ///
    /// - `UnknownScenario` if `name` is not a scenario kind
    /// - `UnexpectedPolicyEffects` if effects are given for a non-policy kind
    /// - `MissingPolicyEffect` if the policy kind has no effects
    ///
    /// # Examples
    ///
    /// ```
    /// use adoption_models::scenarios::{ScenarioKind, ScenarioSelector};
    ///
    /// let selector = ScenarioSelector::from_parts("optimistic", None).unwrap();
    /// assert_eq!(selector.kind(), ScenarioKind::Optimistic);
    /// ```
    pub fn from_parts(name: &str, effects: Option<PolicyEffects>) -> Result<Self, ScenarioError> {
        let kind: ScenarioKind = name.parse()?;
        match (kind, effects) {
            (ScenarioKind::PolicyIntervention, Some(effects)) => {
                Ok(Self::PolicyIntervention(effects))
            }
            (ScenarioKind::PolicyIntervention, None) => {
                Err(ScenarioError::MissingPolicyEffect(SME_SUPPORT))
            }
            (kind, Some(effects)) if !effects.is_empty() => {
                Err(ScenarioError::UnexpectedPolicyEffects(kind))
            }
            (ScenarioKind::Baseline, _) => Ok(Self::Baseline),
            (ScenarioKind::Optimistic, _) => Ok(Self::Optimistic),
            (ScenarioKind::Pessimistic, _) => Ok(Self::Pessimistic),
            (ScenarioKind::Disruption, _) => Ok(Self::Disruption),
        }
    }

    /// Kind of this selector.
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Self::Baseline => ScenarioKind::Baseline,
            Self::Optimistic => ScenarioKind::Optimistic,
            Self::Pessimistic => ScenarioKind::Pessimistic,
            Self::PolicyIntervention(_) => ScenarioKind::PolicyIntervention,
            Self::Disruption => ScenarioKind::Disruption,
        }
    }

    /// Policy effects, for the policy scenario.
    pub fn policy_effects(&self) -> Option<&PolicyEffects> {
        match self {
            Self::PolicyIntervention(effects) => Some(effects),
            _ => None,
        }
    }

    /// Reference scenario set: the four table scenarios plus a policy
    /// intervention with 15% SME support and a 5% overall boost.
    pub fn standard_set() -> Vec<Self> {
        vec![
            Self::Baseline,
            Self::Optimistic,
            Self::Pessimistic,
            Self::PolicyIntervention(
                PolicyEffects::new()
                    .with(SME_SUPPORT, 0.15)
                    .with(OVERALL_BOOST, 0.05),
            ),
            Self::Disruption,
        ]
    }
}

impl fmt::Display for ScenarioSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip_names() {
        for kind in ScenarioKind::ALL {
            assert_eq!(kind.name().parse::<ScenarioKind>().unwrap(), kind);
        }
        assert_eq!(
            "Policy-Intervention".parse::<ScenarioKind>().unwrap(),
            ScenarioKind::PolicyIntervention
        );
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            "hyperdrive".parse::<ScenarioKind>(),
            Err(ScenarioError::UnknownScenario("hyperdrive".to_string()))
        );
    }

    #[test]
    fn test_seed_tags_distinct() {
        let mut tags: Vec<u64> = ScenarioKind::ALL.iter().map(|k| k.seed_tag()).collect();
        tags.dedup();
        assert_eq!(tags.len(), ScenarioKind::ALL.len());
    }

    #[test]
    fn test_from_parts_policy_requires_effects() {
        assert_eq!(
            ScenarioSelector::from_parts("policy_intervention", None),
            Err(ScenarioError::MissingPolicyEffect(SME_SUPPORT))
        );
    }

    #[test]
    fn test_from_parts_rejects_effects_on_table_scenario() {
        let effects = PolicyEffects::new().with(SME_SUPPORT, 0.1);
        assert_eq!(
            ScenarioSelector::from_parts("baseline", Some(effects)),
            Err(ScenarioError::UnexpectedPolicyEffects(ScenarioKind::Baseline))
        );
        assert_eq!(
            ScenarioSelector::from_parts("baseline", Some(PolicyEffects::new())),
            Ok(ScenarioSelector::Baseline)
        );
    }

    #[test]
    fn test_policy_effects_validate() {
        let complete = PolicyEffects::new()
            .with(SME_SUPPORT, 0.15)
            .with(OVERALL_BOOST, 0.05);
        assert!(complete.validate().is_ok());

        let missing = PolicyEffects::new().with(SME_SUPPORT, 0.15);
        assert_eq!(
            missing.validate(),
            Err(ScenarioError::MissingPolicyEffect(OVERALL_BOOST))
        );

        let unknown = complete.clone().with("tax_credit", 0.1);
        assert_eq!(
            unknown.validate(),
            Err(ScenarioError::UnknownPolicyEffect("tax_credit".to_string()))
        );

        let nan = complete.with(OVERALL_BOOST, f64::NAN);
        assert!(matches!(
            nan.validate(),
            Err(ScenarioError::NonFinitePolicyEffect { .. })
        ));
    }

    #[test]
    fn test_standard_set() {
        let set = ScenarioSelector::standard_set();
        let kinds: Vec<ScenarioKind> = set.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, ScenarioKind::ALL.to_vec());
        assert!(set[3].policy_effects().unwrap().validate().is_ok());
    }
}
