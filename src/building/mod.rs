mod analyze;

pub use analyze::analyze_buildings;

use geo::Polygon;
use serde::{Deserialize, Serialize};

use crate::{
    field::Component,
    risk::{RiskLabel, VulnerabilityTier},
};

/// Raw categorical attributes as found on the building layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingAttributes {
    #[serde(default)]
    pub foundation: Option<String>,
    #[serde(default)]
    pub structure: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
}

/// A building footprint to be assessed.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: String,
    pub footprint: Polygon<f64>,
    pub attributes: BuildingAttributes,
}

impl Building {
    pub fn new(id: impl Into<String>, footprint: Polygon<f64>) -> Self {
        Self { id: id.into(), footprint, attributes: BuildingAttributes::default() }
    }

    pub fn with_attributes(mut self, attributes: BuildingAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Settlement at one footprint corner. Settlements in mm, distance in m.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CornerRecord {
    pub building: usize,   // Index of the building in the input
    pub building_id: String,
    pub corner: usize,     // Position in ring order
    pub x: f64,
    pub y: f64,
    pub distance: f64,
    pub short_term: Component,
    pub long_term: Component,
    pub total: Component,
    pub risk: Option<RiskLabel>, // None when the total is undefined
}

/// Inclination of one wall between consecutive corners, in radians.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallRecord {
    pub building: usize,
    pub building_id: String,
    pub wall: usize, // Wall i joins corner i to corner i+1 (last joins back to 0)
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub inclination: Option<f64>,
    pub risk: Option<RiskLabel>,
}

/// Per-building aggregates over its corners and walls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingRecord {
    pub building: usize,
    pub building_id: String,
    pub max_settlement: Option<f64>,  // mm, over defined corners
    pub max_inclination: Option<f64>, // |rad|, over defined walls
    pub undefined_corners: usize,
    pub settlement_risk: Option<RiskLabel>,
    pub inclination_risk: Option<RiskLabel>,
    pub vulnerability: Option<VulnerabilityTier>,
    pub settlement_risk_adjusted: Option<RiskLabel>,
    pub inclination_risk_adjusted: Option<RiskLabel>,
    pub risk: Option<RiskLabel>, // More severe of the (adjusted) settlement and inclination risk
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    TooFewCorners,
    SelfIntersecting,
    NonFiniteCoordinates,
}

impl SkipReason {
    pub fn to_str(&self) -> &'static str {
        match self {
            SkipReason::TooFewCorners => "fewer than three distinct corners",
            SkipReason::SelfIntersecting => "self-intersecting footprint",
            SkipReason::NonFiniteCoordinates => "non-finite footprint coordinates",
        }
    }
}

/// A building left out of the analysis because of its footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedBuilding {
    pub building: usize,
    pub building_id: String,
    pub reason: SkipReason,
}

/// Result record sets of a building analysis, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildingAnalysis {
    pub corners: Vec<CornerRecord>,
    pub walls: Vec<WallRecord>,
    pub buildings: Vec<BuildingRecord>,
    pub skipped: Vec<SkippedBuilding>,
}

impl BuildingAnalysis {
    /// Corner records of building `index`.
    pub fn corners_of(&self, index: usize) -> impl Iterator<Item = &CornerRecord> {
        self.corners.iter().filter(move |corner| corner.building == index)
    }

    /// Wall records of building `index`.
    pub fn walls_of(&self, index: usize) -> impl Iterator<Item = &WallRecord> {
        self.walls.iter().filter(move |wall| wall.building == index)
    }
}
