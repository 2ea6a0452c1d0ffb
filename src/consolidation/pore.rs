use serde::{Deserialize, Serialize};

use crate::{
    consolidation::UNIT_WEIGHT_WATER,
    error::{ensure_non_negative, Result},
    geom::SourceKind,
};

/// Pore-pressure reduction level around an excavation, as a flat share of the supplied reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReductionLevel {
    Low,
    Medium,
    High,
}

impl ReductionLevel {
    pub fn fraction(&self) -> f64 {
        match self {
            ReductionLevel::Low => 0.5,
            ReductionLevel::Medium => 0.75,
            ReductionLevel::High => 1.0,
        }
    }
}

/// Calibration band relating tunnel leakage to pore-pressure reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LeakageBand {
    Upper,
    Typical,
    Lower,
}

impl LeakageBand {
    /// Peak reduction (kPa) per unit leakage (L/min per 100 m of tunnel).
    pub fn reduction_per_leakage(&self) -> f64 {
        match self {
            LeakageBand::Upper => 4.0,
            LeakageBand::Typical => 2.5,
            LeakageBand::Lower => 1.0,
        }
    }

    /// Scale applied to the drawdown radius.
    pub fn reach_factor(&self) -> f64 {
        match self {
            LeakageBand::Upper => 1.5,
            LeakageBand::Typical => 1.0,
            LeakageBand::Lower => 0.6,
        }
    }
}

/// How the pore-pressure reduction at the source is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoreReduction {
    /// Share of a supplied reduction, for excavations.
    Excavation { level: ReductionLevel, reduction_kpa: f64 },
    /// Derived from tunnel leakage through a calibration band.
    Tunnel { band: LeakageBand, leakage: f64 },
    /// Reduction supplied directly (kPa).
    Manual { reduction_kpa: f64 },
    /// Drawdown supplied as head of water (m).
    Head { metres: f64 },
}

impl PoreReduction {
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            PoreReduction::Excavation { reduction_kpa, .. } => ensure_non_negative("pore_pressure_reduction", *reduction_kpa),
            PoreReduction::Tunnel { leakage, .. } => ensure_non_negative("tunnel_leakage", *leakage),
            PoreReduction::Manual { reduction_kpa } => ensure_non_negative("pore_pressure_reduction", *reduction_kpa),
            PoreReduction::Head { metres } => ensure_non_negative("drawdown_head", *metres),
        }
    }

    /// The source kind this reduction is calibrated for, if any.
    pub fn source_kind(&self) -> Option<SourceKind> {
        match self {
            PoreReduction::Excavation { .. } => Some(SourceKind::Excavation),
            PoreReduction::Tunnel { .. } => Some(SourceKind::Tunnel),
            PoreReduction::Manual { .. } | PoreReduction::Head { .. } => None,
        }
    }

    /// Reduction at the source (kPa).
    pub fn peak(&self) -> f64 {
        match self {
            PoreReduction::Excavation { level, reduction_kpa } => level.fraction() * reduction_kpa,
            PoreReduction::Tunnel { band, leakage } => band.reduction_per_leakage() * leakage,
            PoreReduction::Manual { reduction_kpa } => *reduction_kpa,
            PoreReduction::Head { metres } => metres * UNIT_WEIGHT_WATER,
        }
    }

    /// Radius (m) at which the reduction has decayed to zero.
    pub fn reach(&self, drawdown_radius: f64) -> f64 {
        match self {
            PoreReduction::Tunnel { band, .. } => band.reach_factor() * drawdown_radius,
            _ => drawdown_radius,
        }
    }

    /// Reduction (kPa) at `distance` from the source: `peak·(1 − x/R)²`, zero beyond `R`.
    pub fn at(&self, distance: f64, drawdown_radius: f64) -> f64 {
        let reach = self.reach(drawdown_radius);
        let x = distance.max(0.0);
        if !(reach > 0.0) || x >= reach { return 0.0 }

        let remaining = 1.0 - x / reach;
        self.peak() * remaining * remaining
    }
}
