#![doc = "Begrens public API: settlement and building damage risk around excavations and tunnels"]
mod building;
mod config;
mod consolidation;
mod curves;
mod error;
mod field;
mod geom;
mod impact;
mod labels;
mod raster;
mod risk;

/// Geometry types used in the API.
pub use geo;

#[doc(inline)]
pub use error::{ConfigError, Result};

#[doc(inline)]
pub use geom::{
    inclination, is_self_intersecting, point_line_distance, point_polygon_distance, point_segment_distance,
    polygon_from_rings, ring_corners, SourceGeometry, SourceIndex, SourceKind,
};

#[doc(inline)]
pub use curves::{excavation_settlement, ExcavationCurve, ShortTermConfig, TunnelTrough};

#[doc(inline)]
pub use consolidation::{
    degree_of_consolidation, janbu_strain, layer_settlement, LeakageBand, LongTermConfig, PoreReduction,
    ReductionLevel, SoilProfile, UNIT_WEIGHT_WATER,
};

#[doc(inline)]
pub use field::{Component, SettlementField, SettlementSample};

#[doc(inline)]
pub use raster::Raster;

#[doc(inline)]
pub use config::AnalysisConfig;

#[doc(inline)]
pub use labels::{excavation_pore_reduction, tunnel_pore_reduction, Labelled};

#[doc(inline)]
pub use risk::{
    classify_inclination, classify_settlement, Condition, Foundation, RiskLabel, Structure, Vulnerability,
    VulnerabilityTier,
};

#[doc(inline)]
pub use building::{
    analyze_buildings, Building, BuildingAnalysis, BuildingAttributes, BuildingRecord, CornerRecord, SkipReason,
    SkippedBuilding, WallRecord,
};

#[doc(inline)]
pub use impact::{impact_map, ImpactGrid, ImpactGridConfig, IMPACT_NODATA};
