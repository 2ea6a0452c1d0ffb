//! Display strings for the selector enums, in English and Norwegian.
//!
//! Computation only sees the enums; these tables exist for presentation and for
//! reading selectors back from legacy form values such as `"1 % av byggegropdybde"`.

use crate::{
    consolidation::{LeakageBand, PoreReduction, ReductionLevel},
    curves::ExcavationCurve,
    error::{ConfigError, Result},
    risk::{Condition, Foundation, RiskLabel, Structure, VulnerabilityTier},
};

/// An enum with a fixed table of `(value, key, english, norwegian)` strings.
pub trait Labelled: Copy + PartialEq + 'static {
    /// Name used in error messages.
    const KIND: &'static str;
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)];

    /// Stable machine key (matches the serde name).
    fn key(&self) -> &'static str { self.row().map_or("", |row| row.1) }

    fn english(&self) -> &'static str { self.row().map_or("", |row| row.2) }

    fn norwegian(&self) -> &'static str { self.row().map_or("", |row| row.3) }

    /// Parse a key or display label in either language, ignoring case and surrounding space.
    fn from_label(label: &str) -> Result<Self> {
        let wanted = label.trim().to_lowercase();
        Self::TABLE.iter()
            .find(|(_, key, en, no)| [key, en, no].iter().any(|s| s.to_lowercase() == wanted))
            .map(|row| row.0)
            .ok_or_else(|| ConfigError::UnknownCurve { kind: Self::KIND, label: label.to_string() })
    }

    #[doc(hidden)]
    fn row(&self) -> Option<&'static (Self, &'static str, &'static str, &'static str)> {
        Self::TABLE.iter().find(|row| row.0 == *self)
    }
}

impl Labelled for ExcavationCurve {
    const KIND: &'static str = "settlement curve";
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)] = &[
        (ExcavationCurve::HalfPercent, "half_percent", "0.5 % of excavation depth", "0,5 % av byggegropdybde"),
        (ExcavationCurve::OnePercent, "one_percent", "1 % of excavation depth", "1 % av byggegropdybde"),
        (ExcavationCurve::TwoPercent, "two_percent", "2 % of excavation depth", "2 % av byggegropdybde"),
        (ExcavationCurve::ThreePercent, "three_percent", "3 % of excavation depth", "3 % av byggegropdybde"),
    ];
}

impl Labelled for ReductionLevel {
    const KIND: &'static str = "pore pressure curve";
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)] = &[
        (ReductionLevel::Low, "low", "Low pore pressure reduction", "Lav poretrykksreduksjon"),
        (ReductionLevel::Medium, "medium", "Medium pore pressure reduction", "Middels poretrykksreduksjon"),
        (ReductionLevel::High, "high", "High pore pressure reduction", "Høy poretrykksreduksjon"),
    ];
}

impl Labelled for LeakageBand {
    const KIND: &'static str = "pore pressure curve";
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)] = &[
        (LeakageBand::Upper, "upper", "Upper", "Øvre"),
        (LeakageBand::Typical, "typical", "Typical", "Typisk"),
        (LeakageBand::Lower, "lower", "Lower", "Nedre"),
    ];
}

impl Labelled for RiskLabel {
    const KIND: &'static str = "risk label";
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)] = &[
        (RiskLabel::Negligible, "negligible", "Negligible", "Ubetydelig"),
        (RiskLabel::Small, "small", "Small", "Liten"),
        (RiskLabel::Medium, "medium", "Medium", "Middels"),
        (RiskLabel::Large, "large", "Large", "Stor"),
    ];
}

impl Labelled for VulnerabilityTier {
    const KIND: &'static str = "vulnerability tier";
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)] = &[
        (VulnerabilityTier::Unknown, "unknown", "Unknown", "Ukjent"),
        (VulnerabilityTier::Low, "low", "Low", "Lav"),
        (VulnerabilityTier::Medium, "medium", "Medium", "Middels"),
        (VulnerabilityTier::High, "high", "High", "Høy"),
    ];
}

impl Labelled for Foundation {
    const KIND: &'static str = "foundation";
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)] = &[
        (Foundation::Piled, "piled", "Piled to rock", "Peler til fjell"),
        (Foundation::Raft, "raft", "Raft", "Plate"),
        (Foundation::Strip, "strip", "Strip footing", "Stripefundament"),
        (Foundation::Unknown, "unknown", "Unknown", "Ukjent"),
    ];
}

impl Labelled for Structure {
    const KIND: &'static str = "structure";
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)] = &[
        (Structure::Steel, "steel", "Steel", "Stål"),
        (Structure::Concrete, "concrete", "Reinforced concrete", "Armert betong"),
        (Structure::Timber, "timber", "Timber", "Tre"),
        (Structure::Masonry, "masonry", "Masonry", "Murverk"),
        (Structure::Unknown, "unknown", "Unknown", "Ukjent"),
    ];
}

impl Labelled for Condition {
    const KIND: &'static str = "condition";
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)] = &[
        (Condition::Good, "good", "Good", "God"),
        (Condition::Fair, "fair", "Fair", "Middels"),
        (Condition::Poor, "poor", "Poor", "Dårlig"),
        (Condition::Unknown, "unknown", "Unknown", "Ukjent"),
    ];
}

macro_rules! label_serde {
    ($($ty:ty),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = ConfigError;
            fn try_from(label: String) -> Result<Self> { <$ty as Labelled>::from_label(&label) }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String { value.key().to_string() }
        }
    )*};
}

label_serde!(ExcavationCurve, ReductionLevel, LeakageBand);

/// Pore-pressure model for an excavation from a legacy curve label.
pub fn excavation_pore_reduction(label: &str, reduction_kpa: f64) -> Result<PoreReduction> {
    Ok(PoreReduction::Excavation { level: ReductionLevel::from_label(label)?, reduction_kpa })
}

/// Pore-pressure model for a tunnel from a legacy curve label. `"Manual"` (`"Manuell"`)
/// selects the directly supplied reduction, every other label names a leakage band.
pub fn tunnel_pore_reduction(label: &str, leakage: f64, manual_reduction_kpa: f64) -> Result<PoreReduction> {
    let trimmed = label.trim();
    if ["manual", "manuell"].iter().any(|m| trimmed.eq_ignore_ascii_case(m)) {
        return Ok(PoreReduction::Manual { reduction_kpa: manual_reduction_kpa });
    }
    Ok(PoreReduction::Tunnel { band: LeakageBand::from_label(trimmed)?, leakage })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_norwegian_labels() {
        assert_eq!(ExcavationCurve::from_label("0,5 % av byggegropdybde"), Ok(ExcavationCurve::HalfPercent));
        assert_eq!(ExcavationCurve::from_label(" 3 % AV byggegropdybde "), Ok(ExcavationCurve::ThreePercent));
        assert_eq!(ReductionLevel::from_label("høy poretrykksreduksjon"), Ok(ReductionLevel::High));
        assert_eq!(LeakageBand::from_label("Øvre"), Ok(LeakageBand::Upper));
    }

    #[test]
    fn parses_keys_and_english() {
        assert_eq!(ExcavationCurve::from_label("two_percent"), Ok(ExcavationCurve::TwoPercent));
        assert_eq!(ReductionLevel::from_label("Medium pore pressure reduction"), Ok(ReductionLevel::Medium));
        assert_eq!(LeakageBand::from_label("typical"), Ok(LeakageBand::Typical));
    }

    #[test]
    fn unknown_selector_is_a_config_error() {
        assert_eq!(
            ExcavationCurve::from_label("4 % av byggegropdybde"),
            Err(ConfigError::UnknownCurve { kind: "settlement curve", label: "4 % av byggegropdybde".to_string() })
        );
    }

    #[test]
    fn display_tables_round_trip() {
        for curve in ExcavationCurve::all() {
            assert_eq!(ExcavationCurve::from_label(curve.norwegian()), Ok(curve));
            assert_eq!(ExcavationCurve::from_label(curve.english()), Ok(curve));
        }
        assert_eq!(RiskLabel::Large.norwegian(), "Stor");
    }

    #[test]
    fn tunnel_manual_curve() {
        assert_eq!(
            tunnel_pore_reduction("Manuell", 10.0, 35.0),
            Ok(PoreReduction::Manual { reduction_kpa: 35.0 })
        );
        assert_eq!(
            tunnel_pore_reduction("Lower", 10.0, 35.0),
            Ok(PoreReduction::Tunnel { band: LeakageBand::Lower, leakage: 10.0 })
        );
        assert!(tunnel_pore_reduction("Bottom", 10.0, 35.0).is_err());
    }

    #[test]
    fn serde_accepts_labels() {
        let curve: ExcavationCurve = serde_json::from_str(r#""1 % av byggegropdybde""#).unwrap();
        assert_eq!(curve, ExcavationCurve::OnePercent);
        assert_eq!(serde_json::to_string(&curve).unwrap(), r#""one_percent""#);
        assert!(serde_json::from_str::<LeakageBand>(r#""sideways""#).is_err());
    }
}
