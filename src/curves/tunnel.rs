use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ConfigError, Result};

/// Number of trough widths beyond which the Gaussian trough is treated as vanished.
const TROUGH_CUTOFF: f64 = 5.0;

/// Gaussian settlement trough above a tunnel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TunnelTrough {
    pub depth: f64,        // Depth to tunnel axis (m)
    pub diameter: f64,     // Tunnel diameter (m)
    pub volume_loss: f64,  // Volume loss (% of excavated cross-section)
    pub trough_width: f64, // Trough width factor K, i = K·depth
}

impl Default for TunnelTrough {
    fn default() -> Self {
        Self { depth: 15.0, diameter: 9.5, volume_loss: 2.0, trough_width: 0.5 }
    }
}

impl TunnelTrough {
    pub(crate) fn validate(&self) -> Result<()> {
        ensure_positive("tunnel_depth", self.depth)?;
        ensure_positive("tunnel_diameter", self.diameter)?;
        ensure_positive("trough_width", self.trough_width)?;
        ensure_non_negative("volume_loss", self.volume_loss)?;
        if self.volume_loss > 100.0 {
            return Err(ConfigError::range("volume_loss", self.volume_loss, "0..=100 %"));
        }
        Ok(())
    }

    /// Distance from the centre line to the trough's inflection point (m).
    #[inline] pub fn inflection(&self) -> f64 { self.trough_width * self.depth }

    /// Settlement volume per metre of tunnel (m³/m).
    #[inline]
    pub fn settlement_volume(&self) -> f64 {
        self.volume_loss / 100.0 * PI * self.diameter * self.diameter / 4.0
    }

    /// Settlement directly above the tunnel (m).
    #[inline]
    pub fn max_settlement(&self) -> f64 {
        self.settlement_volume() / ((2.0 * PI).sqrt() * self.inflection())
    }

    /// Settlement (m) at offset `distance` from the tunnel. Symmetric in the offset.
    pub fn settlement_at(&self, distance: f64) -> f64 {
        let i = self.inflection();
        self.max_settlement() * (-(distance * distance) / (2.0 * i * i)).exp()
    }

    /// Offset beyond which the trough is below 4e-6 of its maximum.
    #[inline] pub fn influence_radius(&self) -> f64 { TROUGH_CUTOFF * self.inflection() }
}
