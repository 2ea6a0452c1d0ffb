use geo::Coord;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::{
    building::{
        Building, BuildingAnalysis, BuildingRecord, CornerRecord, SkipReason, SkippedBuilding, WallRecord,
    },
    config::AnalysisConfig,
    error::Result,
    field::SettlementField,
    geom::{inclination, is_self_intersecting, ring_corners, SourceIndex},
    raster::Raster,
    risk::{classify_inclination, classify_settlement, Vulnerability},
};

const MM_PER_M: f64 = 1000.0;

/// Records for one building that was analysed.
struct Assessed {
    corners: Vec<CornerRecord>,
    walls: Vec<WallRecord>,
    building: BuildingRecord,
}

/// Assess every building against the sources.
///
/// The configuration is validated first; after that the call always completes,
/// reporting data gaps as undefined values and degenerate footprints in `skipped`.
/// Buildings are processed in parallel and records come back in input order.
pub fn analyze_buildings(
    sources: &SourceIndex,
    buildings: &[Building],
    config: &AnalysisConfig,
    bedrock: Option<&Raster>,
) -> Result<BuildingAnalysis> {
    config.validate(sources.kind(), bedrock.is_some())?;
    let field = config.field();

    let outcomes: Vec<std::result::Result<Assessed, SkippedBuilding>> = buildings.par_iter()
        .enumerate()
        .map(|(index, building)| assess(index, building, sources, &field, bedrock, config.vulnerability))
        .collect();

    let mut analysis = BuildingAnalysis::default();
    for outcome in outcomes {
        match outcome {
            Ok(assessed) => {
                analysis.corners.extend(assessed.corners);
                analysis.walls.extend(assessed.walls);
                analysis.buildings.push(assessed.building);
            }
            Err(skipped) => {
                warn!("skipping building {} ({}): {}", skipped.building, skipped.building_id, skipped.reason.to_str());
                analysis.skipped.push(skipped);
            }
        }
    }

    let undefined: usize = analysis.buildings.iter().map(|b| b.undefined_corners).sum();
    if undefined > 0 {
        warn!("{undefined} corners have undefined long-term settlement (no bedrock depth)");
    }
    info!(
        "analysed {} buildings ({} corners, {} walls), skipped {}",
        analysis.buildings.len(), analysis.corners.len(), analysis.walls.len(), analysis.skipped.len(),
    );

    Ok(analysis)
}

fn assess(
    index: usize,
    building: &Building,
    sources: &SourceIndex,
    field: &SettlementField,
    bedrock: Option<&Raster>,
    vulnerability: bool,
) -> std::result::Result<Assessed, SkippedBuilding> {
    let skip = |reason| SkippedBuilding { building: index, building_id: building.id.clone(), reason };

    let ring = building.footprint.exterior();
    if ring.coords().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(skip(SkipReason::NonFiniteCoordinates));
    }
    let points = ring_corners(ring);
    if points.len() < 3 { return Err(skip(SkipReason::TooFewCorners)) }
    if is_self_intersecting(ring) { return Err(skip(SkipReason::SelfIntersecting)) }

    // Totals in metres, kept for the inclination so both axes share a unit.
    let mut totals: Vec<Option<f64>> = Vec::with_capacity(points.len());
    let corners: Vec<CornerRecord> = points.iter()
        .enumerate()
        .map(|(corner, &p)| {
            let distance = sources.distance(p);
            let sample = field.sample(distance, bedrock.and_then(|raster| raster.sample(p)));
            totals.push(sample.total.value());

            let total = sample.total.map(|s| s * MM_PER_M);
            CornerRecord {
                building: index,
                building_id: building.id.clone(),
                corner,
                x: p.x,
                y: p.y,
                distance,
                short_term: sample.short_term.map(|s| s * MM_PER_M),
                long_term: sample.long_term.map(|s| s * MM_PER_M),
                total,
                risk: total.value().map(classify_settlement),
            }
        })
        .collect();

    let n = points.len();
    let walls: Vec<WallRecord> = (0..n)
        .map(|wall| {
            let (a, b) = (points[wall], points[(wall + 1) % n]);
            let angle = wall_inclination(a, b, totals[wall], totals[(wall + 1) % n]);
            WallRecord {
                building: index,
                building_id: building.id.clone(),
                wall,
                start: [a.x, a.y],
                end: [b.x, b.y],
                inclination: angle,
                risk: angle.map(classify_inclination),
            }
        })
        .collect();

    let max_settlement = corners.iter()
        .filter_map(|corner| corner.total.value())
        .reduce(f64::max);
    let max_inclination = walls.iter()
        .filter_map(|wall| wall.inclination.map(f64::abs))
        .reduce(f64::max);
    let undefined_corners = corners.iter().filter(|corner| corner.total.is_undefined()).count();

    let settlement_risk = max_settlement.map(classify_settlement);
    let inclination_risk = max_inclination.map(classify_inclination);

    let vulnerability = vulnerability.then(|| Vulnerability::from_attributes(
        building.attributes.foundation.as_deref(),
        building.attributes.structure.as_deref(),
        building.attributes.condition.as_deref(),
    ));
    let settlement_risk_adjusted = vulnerability.and_then(|v| settlement_risk.map(|r| v.adjust(r)));
    let inclination_risk_adjusted = vulnerability.and_then(|v| inclination_risk.map(|r| v.adjust(r)));

    let risk = match vulnerability {
        Some(_) => settlement_risk_adjusted.max(inclination_risk_adjusted),
        None => settlement_risk.max(inclination_risk),
    };

    if undefined_corners > 0 {
        debug!("building {} ({}): {undefined_corners} undefined corners", index, building.id);
    }

    Ok(Assessed {
        building: BuildingRecord {
            building: index,
            building_id: building.id.clone(),
            max_settlement,
            max_inclination,
            undefined_corners,
            settlement_risk,
            inclination_risk,
            vulnerability: vulnerability.map(|v| v.tier()),
            settlement_risk_adjusted,
            inclination_risk_adjusted,
            risk,
        },
        corners,
        walls,
    })
}

/// Inclination between two corners with total settlements in metres; undefined when
/// either settlement is.
#[inline]
fn wall_inclination(a: Coord<f64>, b: Coord<f64>, settlement_a: Option<f64>, settlement_b: Option<f64>) -> Option<f64> {
    inclination(a, b, settlement_a?, settlement_b?)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::{coord, polygon};

    use super::*;
    use crate::{
        building::BuildingAttributes,
        consolidation::{LongTermConfig, PoreReduction, SoilProfile},
        curves::{ExcavationCurve, ShortTermConfig},
        field::Component,
        risk::{RiskLabel, VulnerabilityTier},
    };

    fn pit() -> SourceIndex {
        SourceIndex::excavations(vec![
            polygon![(x: -10.0, y: -10.0), (x: 10.0, y: -10.0), (x: 10.0, y: 10.0), (x: -10.0, y: 10.0)],
        ]).unwrap()
    }

    fn short_only() -> AnalysisConfig {
        AnalysisConfig {
            short_term: Some(ShortTermConfig::Excavation { depth: 10.0, curve: ExcavationCurve::OnePercent }),
            ..Default::default()
        }
    }

    #[test]
    fn walls_tilt_towards_the_pit() {
        // East of the pit, 2 m to 12 m away.
        let building = Building::new("b", polygon![
            (x: 12.0, y: -2.0), (x: 22.0, y: -2.0), (x: 22.0, y: 2.0), (x: 12.0, y: 2.0),
        ]);
        let analysis = analyze_buildings(&pit(), &[building], &short_only(), None).unwrap();

        let near = analysis.corners[0].total.value().unwrap();
        let far = analysis.corners[1].total.value().unwrap();
        assert!(near > far);

        let expected = ((far - near) / 1000.0).atan2(10.0);
        assert_relative_eq!(analysis.walls[0].inclination.unwrap(), expected, max_relative = 1e-12);
        assert_eq!(analysis.walls[1].inclination, Some(0.0));
    }

    #[test]
    fn degenerate_footprints_are_skipped() {
        let sliver = Building::new("sliver", polygon![(x: 20.0, y: 0.0), (x: 30.0, y: 0.0), (x: 20.0, y: 0.0)]);
        let bowtie = Building::new("bowtie", polygon![
            (x: 20.0, y: 0.0), (x: 30.0, y: 10.0), (x: 30.0, y: 0.0), (x: 20.0, y: 10.0),
        ]);
        let fine = Building::new("fine", polygon![(x: 20.0, y: 0.0), (x: 30.0, y: 0.0), (x: 30.0, y: 10.0)]);

        let analysis = analyze_buildings(&pit(), &[sliver, bowtie, fine], &short_only(), None).unwrap();
        assert_eq!(analysis.skipped.len(), 2);
        assert_eq!(analysis.skipped[0].reason, SkipReason::TooFewCorners);
        assert_eq!(analysis.skipped[1].reason, SkipReason::SelfIntersecting);
        assert_eq!(analysis.buildings.len(), 1);
        assert_eq!(analysis.buildings[0].building, 2);
        assert_eq!(analysis.corners.len(), 3);
        assert_eq!(analysis.walls.len(), 3);
    }

    #[test]
    fn non_finite_footprints_are_skipped() {
        let broken = Building::new("nan", polygon![
            (x: 210.0, y: 0.0), (x: f64::NAN, y: 5.0), (x: 220.0, y: 10.0), (x: 210.0, y: 10.0),
        ]);
        let fine = Building::new("fine", polygon![(x: 20.0, y: 0.0), (x: 30.0, y: 0.0), (x: 30.0, y: 10.0)]);

        let analysis = analyze_buildings(&pit(), &[broken, fine], &short_only(), None).unwrap();
        assert_eq!(analysis.skipped.len(), 1);
        assert_eq!(analysis.skipped[0].building, 0);
        assert_eq!(analysis.skipped[0].reason, SkipReason::NonFiniteCoordinates);
        assert!(analysis.corners.iter().all(|c| c.building == 1 && c.distance.is_finite()));
        assert!(analysis.walls.iter().all(|w| w.inclination.is_some_and(f64::is_finite)));
    }

    #[test]
    fn undefined_corners_are_excluded_from_maxima() {
        // Bedrock raster covers only the western half of the building.
        let raster = Raster::new(coord! { x: 0.0, y: 20.0 }, 15.0, 1, 2, vec![25.0, 25.0], None).unwrap();
        let config = AnalysisConfig {
            long_term: Some(LongTermConfig::new(SoilProfile::default(), PoreReduction::Manual { reduction_kpa: 60.0 })),
            ..short_only()
        };
        let building = Building::new("half", polygon![
            (x: 12.0, y: -2.0), (x: 22.0, y: -2.0), (x: 22.0, y: 2.0), (x: 12.0, y: 2.0),
        ]);
        let analysis = analyze_buildings(&pit(), &[building], &config, Some(&raster)).unwrap();

        let defined: Vec<f64> = analysis.corners.iter().filter_map(|c| c.total.value()).collect();
        assert_eq!(defined.len(), 2);
        assert_eq!(analysis.corners[1].total, Component::Undefined);
        assert_eq!(analysis.corners[1].risk, None);

        let record = &analysis.buildings[0];
        assert_eq!(record.undefined_corners, 2);
        assert_eq!(record.max_settlement, Some(defined.iter().cloned().fold(f64::MIN, f64::max)));
        // Only the wall between the two western corners has an inclination.
        assert_eq!(analysis.walls.iter().filter(|w| w.inclination.is_some()).count(), 1);
    }

    #[test]
    fn vulnerability_raises_building_risk() {
        let building = Building::new("old", polygon![
            (x: 12.0, y: -2.0), (x: 16.0, y: -2.0), (x: 16.0, y: 2.0), (x: 12.0, y: 2.0),
        ])
        .with_attributes(BuildingAttributes {
            foundation: Some("Stripefundament".to_string()),
            structure: Some("Murverk".to_string()),
            condition: Some("Dårlig".to_string()),
        });
        let config = AnalysisConfig { vulnerability: true, ..short_only() };
        let analysis = analyze_buildings(&pit(), &[building], &config, None).unwrap();

        let record = &analysis.buildings[0];
        assert_eq!(record.vulnerability, Some(VulnerabilityTier::High));
        // 2 m from the pit: 0.1·(1 − 2/20)² = 81 mm.
        assert_eq!(record.settlement_risk, Some(RiskLabel::Large));
        assert_eq!(record.settlement_risk_adjusted, Some(RiskLabel::Large));
        assert!(record.inclination_risk_adjusted >= record.inclination_risk);
        assert_eq!(record.risk, Some(RiskLabel::Large));
    }
}
