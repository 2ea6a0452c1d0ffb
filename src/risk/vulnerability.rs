use serde::{Deserialize, Serialize};

use crate::{labels::Labelled, risk::RiskLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Foundation {
    Piled,
    Raft,
    Strip,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    Steel,
    Concrete,
    Timber,
    Masonry,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Good,
    Fair,
    Poor,
    Unknown,
}

impl Foundation {
    fn score(&self) -> Option<u8> {
        match self {
            Foundation::Piled => Some(0),
            Foundation::Raft => Some(1),
            Foundation::Strip => Some(2),
            Foundation::Unknown => None,
        }
    }
}

impl Structure {
    fn score(&self) -> Option<u8> {
        match self {
            Structure::Steel | Structure::Concrete => Some(0),
            Structure::Timber => Some(1),
            Structure::Masonry => Some(2),
            Structure::Unknown => None,
        }
    }
}

impl Condition {
    fn score(&self) -> Option<u8> {
        match self {
            Condition::Good => Some(0),
            Condition::Fair => Some(1),
            Condition::Poor => Some(2),
            Condition::Unknown => None,
        }
    }
}

/// Severity tier derived from a building's vulnerability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerabilityTier {
    Unknown,
    Low,
    Medium,
    High,
}

impl VulnerabilityTier {
    /// Number of categories a risk label is raised by.
    pub fn steps(&self) -> usize {
        match self {
            VulnerabilityTier::Unknown | VulnerabilityTier::Low => 0,
            VulnerabilityTier::Medium => 1,
            VulnerabilityTier::High => 2,
        }
    }
}

/// Categorical building attributes that make it more or less sensitive to settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vulnerability {
    pub foundation: Foundation,
    pub structure: Structure,
    pub condition: Condition,
}

impl Vulnerability {
    /// Read attribute values; missing or unrecognized values become `Unknown`.
    pub fn from_attributes(foundation: Option<&str>, structure: Option<&str>, condition: Option<&str>) -> Self {
        fn parse<T: Labelled>(value: Option<&str>, unknown: T) -> T {
            value.and_then(|v| T::from_label(v).ok()).unwrap_or(unknown)
        }

        Self {
            foundation: parse(foundation, Foundation::Unknown),
            structure: parse(structure, Structure::Unknown),
            condition: parse(condition, Condition::Unknown),
        }
    }

    /// Sum of the attribute scores (0..=6), `None` if any attribute is unknown.
    pub fn score(&self) -> Option<u8> {
        Some(self.foundation.score()? + self.structure.score()? + self.condition.score()?)
    }

    pub fn tier(&self) -> VulnerabilityTier {
        match self.score() {
            None => VulnerabilityTier::Unknown,
            Some(0..=1) => VulnerabilityTier::Low,
            Some(2..=3) => VulnerabilityTier::Medium,
            Some(_) => VulnerabilityTier::High,
        }
    }

    /// Raise `label` by this building's tier. Never lowers it.
    #[inline]
    pub fn adjust(&self, label: RiskLabel) -> RiskLabel {
        label.raise(self.tier().steps())
    }
}
