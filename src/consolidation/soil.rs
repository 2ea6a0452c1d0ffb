use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ConfigError, Result};

/// Unit weight of water (kN/m³).
pub const UNIT_WEIGHT_WATER: f64 = 9.81;

/// Soil parameters for the long-term (consolidation) model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilProfile {
    pub dry_crust_thickness: f64,    // Overburden not affected by drawdown (m)
    pub groundwater_depth: f64,      // Depth to groundwater table (m)
    pub unit_weight: f64,            // Saturated unit weight (kN/m³)
    pub ocr: f64,                    // Over-consolidation ratio
    pub janbu_reference_stress: f64, // p'r (kPa)
    pub janbu_constant: f64,         // a = M0 / (m·p'c)
    pub janbu_modulus: f64,          // Modulus number m
}

impl Default for SoilProfile {
    fn default() -> Self {
        Self {
            dry_crust_thickness: 5.0,
            groundwater_depth: 3.0,
            unit_weight: 18.5,
            ocr: 1.2,
            janbu_reference_stress: 0.0,
            janbu_constant: 4.0,
            janbu_modulus: 15.0,
        }
    }
}

impl SoilProfile {
    pub(crate) fn validate(&self) -> Result<()> {
        ensure_non_negative("dry_crust_thickness", self.dry_crust_thickness)?;
        ensure_non_negative("groundwater_depth", self.groundwater_depth)?;
        ensure_positive("unit_weight", self.unit_weight)?;
        ensure_non_negative("janbu_reference_stress", self.janbu_reference_stress)?;
        ensure_positive("janbu_constant", self.janbu_constant)?;
        ensure_positive("janbu_modulus", self.janbu_modulus)?;
        if !(self.ocr.is_finite() && self.ocr >= 1.0) {
            return Err(ConfigError::range("ocr", self.ocr, ">= 1"));
        }
        Ok(())
    }

    /// Depth where the drawdown starts acting: below both the dry crust and the water table.
    #[inline]
    pub fn compressible_top(&self) -> f64 { self.dry_crust_thickness.max(self.groundwater_depth) }

    /// In-situ vertical effective stress (kPa) at depth `z` (m).
    pub fn effective_stress(&self, z: f64) -> f64 {
        let submerged = (z - self.groundwater_depth).max(0.0);
        self.unit_weight * z - UNIT_WEIGHT_WATER * submerged
    }
}
