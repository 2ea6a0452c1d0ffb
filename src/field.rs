use serde::{Deserialize, Serialize};

use crate::{consolidation::LongTermConfig, curves::ShortTermConfig};

/// One settlement component at a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    /// The component was not requested.
    Disabled,
    /// The component was requested but input data is missing at this location.
    Undefined,
    Value(f64),
}

impl Component {
    /// The value, if defined.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            Component::Value(v) => Some(*v),
            _ => None,
        }
    }

    #[inline] pub fn is_undefined(&self) -> bool { matches!(self, Component::Undefined) }

    /// Linear superposition: undefined wins over everything, disabled is neutral.
    pub fn sum(self, other: Component) -> Component {
        match (self, other) {
            (Component::Undefined, _) | (_, Component::Undefined) => Component::Undefined,
            (Component::Disabled, c) | (c, Component::Disabled) => c,
            (Component::Value(a), Component::Value(b)) => Component::Value(a + b),
        }
    }

    /// Apply `f` to a defined value.
    #[inline]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Component {
        match self {
            Component::Value(v) => Component::Value(f(v)),
            other => other,
        }
    }
}

impl From<Option<f64>> for Component {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Component::Disabled, Component::Value)
    }
}

/// Settlement components at one location (m).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlementSample {
    pub short_term: Component,
    pub long_term: Component,
    pub total: Component,
}

/// Settlement as a function of distance from the source, combining the enabled models.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SettlementField {
    pub short_term: Option<ShortTermConfig>,
    pub long_term: Option<LongTermConfig>,
}

impl SettlementField {
    pub fn new(short_term: Option<ShortTermConfig>, long_term: Option<LongTermConfig>) -> Self {
        Self { short_term, long_term }
    }

    /// Evaluate every enabled component at `distance` (m) with the local bedrock depth (m).
    pub fn sample(&self, distance: f64, bedrock_depth: Option<f64>) -> SettlementSample {
        let short_term = self.short_term
            .map(|model| model.settlement_at(distance))
            .into();
        let long_term = self.long_term
            .map_or(Component::Disabled, |model| model.settlement_at(distance, bedrock_depth));

        SettlementSample { short_term, long_term, total: Component::sum(short_term, long_term) }
    }

    /// Distance beyond which every enabled component is (practically) zero.
    pub fn influence_radius(&self) -> f64 {
        let short = self.short_term.map_or(0.0, |model| model.influence_radius());
        let long = self.long_term.map_or(0.0, |model| model.influence_radius());
        short.max(long)
    }
}
