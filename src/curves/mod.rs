mod excavation;
mod tunnel;

pub use excavation::{excavation_settlement, ExcavationCurve};
pub use tunnel::TunnelTrough;

use serde::{Deserialize, Serialize};

use crate::{error::{ensure_positive, ConfigError, Result}, geom::SourceKind};

/// Short-term settlement model, tied to the kind of source it describes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShortTermConfig {
    /// One-sided decay curve behind an excavation wall.
    Excavation { depth: f64, curve: ExcavationCurve },
    /// Gaussian settlement trough above a tunnel.
    Tunnel(TunnelTrough),
}

impl ShortTermConfig {
    /// Source kind this model applies to.
    pub fn source_kind(&self) -> SourceKind {
        match self {
            ShortTermConfig::Excavation { .. } => SourceKind::Excavation,
            ShortTermConfig::Tunnel(_) => SourceKind::Tunnel,
        }
    }

    /// Check parameter ranges and that the model matches the source kind.
    pub fn validate(&self, sources: SourceKind) -> Result<()> {
        if self.source_kind() != sources {
            return Err(ConfigError::SourceMismatch {
                config: self.source_kind().to_str(),
                source_kind: sources.to_str(),
            });
        }
        match self {
            ShortTermConfig::Excavation { depth, .. } => ensure_positive("excavation_depth", *depth),
            ShortTermConfig::Tunnel(trough) => trough.validate(),
        }
    }

    /// Short-term settlement (m) at `distance` from the source.
    #[inline]
    pub fn settlement_at(&self, distance: f64) -> f64 {
        match self {
            ShortTermConfig::Excavation { depth, curve } => excavation_settlement(distance, *depth, *curve),
            ShortTermConfig::Tunnel(trough) => trough.settlement_at(distance),
        }
    }

    /// Distance beyond which the settlement is zero (or negligible for the Gaussian trough).
    pub fn influence_radius(&self) -> f64 {
        match self {
            ShortTermConfig::Excavation { depth, curve } => curve.influence_factor() * depth,
            ShortTermConfig::Tunnel(trough) => trough.influence_radius(),
        }
    }
}
