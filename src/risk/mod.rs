mod vulnerability;

pub use vulnerability::{Condition, Foundation, Structure, Vulnerability, VulnerabilityTier};

use serde::{Deserialize, Serialize};

/// Settlement breakpoints (mm), lower bound of Small, Medium and Large.
const SETTLEMENT_LIMITS: [f64; 3] = [10.0, 50.0, 75.0];

/// Slope breakpoints (tan θ), lower bound of Small, Medium and Large.
const INCLINATION_LIMITS: [f64; 3] = [1.0 / 500.0, 1.0 / 300.0, 1.0 / 150.0];

/// Ordinal damage risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Negligible,
    Small,
    Medium,
    Large,
}

impl RiskLabel {
    const ORDER: [RiskLabel; 4] = [RiskLabel::Negligible, RiskLabel::Small, RiskLabel::Medium, RiskLabel::Large];

    /// Ordinal rank, 0 for negligible.
    #[inline] pub fn rank(&self) -> usize { *self as usize }

    /// Move up `steps` categories, stopping at Large.
    pub fn raise(self, steps: usize) -> RiskLabel {
        Self::ORDER[(self.rank() + steps).min(Self::ORDER.len() - 1)]
    }

    /// Label of the first interval `[limit_i, limit_i+1)` containing `value`.
    fn from_limits(value: f64, limits: &[f64; 3]) -> RiskLabel {
        let passed = limits.iter().take_while(|&&limit| value >= limit).count();
        Self::ORDER[passed]
    }
}

/// Classify a settlement (mm). Intervals are half-open with inclusive lower bounds;
/// zero, negative and NaN values are negligible.
#[inline]
pub fn classify_settlement(settlement_mm: f64) -> RiskLabel {
    RiskLabel::from_limits(settlement_mm, &SETTLEMENT_LIMITS)
}

/// Classify a wall inclination (radians) by its slope `tan|θ|`. NaN is negligible.
#[inline]
pub fn classify_inclination(angle: f64) -> RiskLabel {
    RiskLabel::from_limits(angle.abs().tan(), &INCLINATION_LIMITS)
}
