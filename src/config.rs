use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    consolidation::LongTermConfig,
    curves::ShortTermConfig,
    error::{ConfigError, Result},
    field::SettlementField,
    geom::SourceKind,
};

/// Everything one analysis needs besides geometry: which settlement components to
/// compute, their parameters, and whether to apply building vulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub short_term: Option<ShortTermConfig>,
    #[serde(default)]
    pub long_term: Option<LongTermConfig>,
    #[serde(default)]
    pub vulnerability: bool,
}

impl AnalysisConfig {
    /// Check the configuration against the source kind and the availability of a bedrock raster.
    pub fn validate(&self, sources: SourceKind, has_bedrock: bool) -> Result<()> {
        if self.short_term.is_none() && self.long_term.is_none() {
            return Err(ConfigError::NothingEnabled);
        }
        if let Some(short_term) = &self.short_term {
            short_term.validate(sources)?;
        }
        if let Some(long_term) = &self.long_term {
            if !has_bedrock { return Err(ConfigError::MissingBedrock) }
            long_term.validate(sources)?;
        }

        debug!(
            "config ok: source={} short_term={} long_term={} vulnerability={}",
            sources.to_str(), self.short_term.is_some(), self.long_term.is_some(), self.vulnerability,
        );
        Ok(())
    }

    /// The settlement field described by this configuration.
    #[inline]
    pub fn field(&self) -> SettlementField {
        SettlementField::new(self.short_term, self.long_term)
    }
}
