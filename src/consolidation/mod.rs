mod janbu;
mod pore;
mod soil;

pub use janbu::{degree_of_consolidation, janbu_strain, layer_settlement};
pub use pore::{LeakageBand, PoreReduction, ReductionLevel};
pub use soil::{SoilProfile, UNIT_WEIGHT_WATER};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ensure_non_negative, ensure_positive, ConfigError, Result},
    field::Component,
    geom::SourceKind,
};

fn default_consolidation_time() -> f64 { 1000.0 }
fn default_drawdown_radius() -> f64 { 150.0 }

/// Long-term settlement model: pore-pressure reduction consolidating the soil between
/// the drawdown top and bedrock, evaluated once at the consolidation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongTermConfig {
    #[serde(default)]
    pub soil: SoilProfile,
    pub pore_reduction: PoreReduction,
    #[serde(default = "default_consolidation_time")]
    pub consolidation_time: f64,                // years
    #[serde(default)]
    pub consolidation_coefficient: Option<f64>, // c_v (m²/year); None = primary consolidation complete
    #[serde(default = "default_drawdown_radius")]
    pub drawdown_radius: f64,                   // m
}

impl LongTermConfig {
    /// Create a config with default timing and drawdown radius.
    pub fn new(soil: SoilProfile, pore_reduction: PoreReduction) -> Self {
        Self {
            soil,
            pore_reduction,
            consolidation_time: default_consolidation_time(),
            consolidation_coefficient: None,
            drawdown_radius: default_drawdown_radius(),
        }
    }

    /// Check parameter ranges and that the pore-pressure model fits the source kind.
    pub fn validate(&self, sources: SourceKind) -> Result<()> {
        self.soil.validate()?;
        self.pore_reduction.validate()?;
        ensure_non_negative("consolidation_time", self.consolidation_time)?;
        ensure_positive("drawdown_radius", self.drawdown_radius)?;
        if let Some(cv) = self.consolidation_coefficient {
            ensure_positive("consolidation_coefficient", cv)?;
        }
        match self.pore_reduction.source_kind() {
            Some(kind) if kind != sources => Err(ConfigError::SourceMismatch {
                config: kind.to_str(),
                source_kind: sources.to_str(),
            }),
            _ => Ok(()),
        }
    }

    /// Distance beyond which the pore-pressure reduction, and so the settlement, is zero.
    #[inline]
    pub fn influence_radius(&self) -> f64 { self.pore_reduction.reach(self.drawdown_radius) }

    /// Degree of consolidation reached at the consolidation time for a layer of `thickness` (m).
    fn degree(&self, thickness: f64) -> f64 {
        match self.consolidation_coefficient {
            None => 1.0,
            Some(_) if thickness <= 0.0 => 1.0,
            Some(cv) => degree_of_consolidation(cv * self.consolidation_time / (thickness * thickness)),
        }
    }

    /// Long-term settlement (m) at `distance` from the source, over bedrock at `bedrock_depth` (m).
    /// A missing, negative or non-finite bedrock depth gives [`Component::Undefined`].
    pub fn settlement_at(&self, distance: f64, bedrock_depth: Option<f64>) -> Component {
        let Some(depth) = bedrock_depth.filter(|d| d.is_finite() && *d >= 0.0) else {
            return Component::Undefined;
        };

        let delta = self.pore_reduction.at(distance, self.drawdown_radius);
        if !(delta > 0.0) { return Component::Value(0.0) }

        let thickness = depth - self.soil.compressible_top();
        let settlement = layer_settlement(&self.soil, delta, depth) * self.degree(thickness);
        Component::Value(if settlement.is_finite() { settlement.max(0.0) } else { 0.0 })
    }
}
