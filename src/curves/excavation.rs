use serde::{Deserialize, Serialize};

/// Empirical settlement curves behind an excavation wall, named by the maximum
/// settlement as a percentage of the excavation depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExcavationCurve {
    HalfPercent,
    OnePercent,
    TwoPercent,
    ThreePercent,
}

impl ExcavationCurve {
    /// Maximum settlement at the wall as a fraction of the excavation depth.
    pub fn settlement_ratio(&self) -> f64 {
        match self {
            ExcavationCurve::HalfPercent => 0.005,
            ExcavationCurve::OnePercent => 0.01,
            ExcavationCurve::TwoPercent => 0.02,
            ExcavationCurve::ThreePercent => 0.03,
        }
    }

    /// Extent of the settlement zone as a multiple of the excavation depth.
    pub fn influence_factor(&self) -> f64 {
        match self {
            ExcavationCurve::HalfPercent | ExcavationCurve::OnePercent => 2.0,
            ExcavationCurve::TwoPercent => 3.0,
            ExcavationCurve::ThreePercent => 4.0,
        }
    }

    pub fn all() -> [ExcavationCurve; 4] {
        [
            ExcavationCurve::HalfPercent,
            ExcavationCurve::OnePercent,
            ExcavationCurve::TwoPercent,
            ExcavationCurve::ThreePercent,
        ]
    }
}

/// Short-term settlement (m) at `distance` (m) from an excavation of the given `depth` (m).
///
/// `S(x) = p·H·(1 − x/L)²` inside the influence zone `L = k·H`, zero beyond it.
/// Negative distances are treated as lying on the wall.
pub fn excavation_settlement(distance: f64, depth: f64, curve: ExcavationCurve) -> f64 {
    let reach = curve.influence_factor() * depth;
    if !(reach > 0.0) { return 0.0 }

    let x = distance.max(0.0);
    if x >= reach { return 0.0 }

    let remaining = 1.0 - x / reach;
    curve.settlement_ratio() * depth * remaining * remaining
}
