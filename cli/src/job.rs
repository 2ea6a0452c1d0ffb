use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use begrens::{
    geo::{Coord, LineString, Polygon},
    polygon_from_rings, AnalysisConfig, Building, BuildingAttributes, ImpactGridConfig, Raster, SourceGeometry,
    SourceIndex, SourceKind,
};
use serde::Deserialize;

type Ring = Vec<[f64; 2]>;

/// One analysis as read from a job file.
#[derive(Debug, Deserialize)]
pub struct Job {
    pub source: SourceInput,
    #[serde(default)]
    pub buildings: Vec<BuildingInput>,
    pub config: AnalysisConfig,
    #[serde(default)]
    pub bedrock: Option<RasterInput>,
    #[serde(default)]
    pub grid: ImpactGridConfig,
}

#[derive(Debug, Deserialize)]
pub struct SourceInput {
    pub kind: SourceKind,
    #[serde(default)]
    pub polygons: Vec<Vec<Ring>>, // Outer ring followed by holes
    #[serde(default)]
    pub alignments: Vec<Ring>,    // Tunnel centre lines
}

#[derive(Debug, Deserialize)]
pub struct BuildingInput {
    pub id: String,
    pub rings: Vec<Ring>,
    #[serde(flatten)]
    pub attributes: BuildingAttributes,
}

#[derive(Debug, Deserialize)]
pub struct RasterInput {
    pub origin: [f64; 2], // Top-left corner
    pub cell_size: f64,
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>, // Row-major, first row at the top
    #[serde(default)]
    pub nodata: Option<f64>,
}

impl Job {
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading job file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing job file {}", path.display()))
    }

    pub fn sources(&self) -> Result<SourceIndex> {
        let input = &self.source;
        if input.kind == SourceKind::Excavation && !input.alignments.is_empty() {
            bail!("alignments are only valid for tunnel sources");
        }

        let mut geometries = Vec::with_capacity(input.polygons.len() + input.alignments.len());
        for (i, rings) in input.polygons.iter().enumerate() {
            let Some(polygon) = polygon_from_rings(rings) else {
                bail!("source polygon {i} has fewer than three distinct points");
            };
            geometries.push(SourceGeometry::Area(polygon));
        }
        for (i, points) in input.alignments.iter().enumerate() {
            if points.len() < 2 { bail!("tunnel alignment {i} needs at least two points") }
            geometries.push(SourceGeometry::Alignment(LineString::from(points.clone())));
        }

        Ok(SourceIndex::new(input.kind, geometries)?)
    }

    /// Buildings in file order. Unreadable footprints become empty polygons so the
    /// analysis reports them as skipped at their original index.
    pub fn buildings(&self) -> Vec<Building> {
        self.buildings.iter()
            .map(|input| {
                let footprint = polygon_from_rings(&input.rings)
                    .unwrap_or_else(|| Polygon::new(LineString::new(vec![]), vec![]));
                Building::new(input.id.clone(), footprint).with_attributes(input.attributes.clone())
            })
            .collect()
    }

    pub fn bedrock(&self) -> Result<Option<Raster>> {
        let Some(input) = &self.bedrock else { return Ok(None) };
        let origin = Coord { x: input.origin[0], y: input.origin[1] };
        let raster = Raster::new(origin, input.cell_size, input.width, input.height, input.values.clone(), input.nodata)
            .context("reading bedrock raster")?;
        Ok(Some(raster))
    }
}

#[cfg(test)]
mod tests {
    use begrens::{analyze_buildings, ExcavationCurve, PoreReduction, ReductionLevel, ShortTermConfig, SkipReason};
    use serde_json::json;

    use super::*;

    fn job(value: serde_json::Value) -> Job {
        serde_json::from_value(value).unwrap()
    }

    fn excavation_job(source: serde_json::Value, buildings: serde_json::Value) -> Job {
        job(json!({
            "source": source,
            "buildings": buildings,
            "config": { "short_term": { "kind": "excavation", "depth": 10.0, "curve": "one_percent" } },
        }))
    }

    fn square_pit() -> serde_json::Value {
        json!({ "kind": "excavation", "polygons": [[[[0.0, 0.0], [20.0, 0.0], [20.0, 20.0], [0.0, 20.0]]]] })
    }

    #[test]
    fn demo_job_runs() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/excavation.json");
        let job = Job::read(&path).unwrap();

        assert_eq!(
            job.config.short_term,
            Some(ShortTermConfig::Excavation { depth: 10.0, curve: ExcavationCurve::OnePercent }),
        );
        let long_term = job.config.long_term.unwrap();
        assert_eq!(
            long_term.pore_reduction,
            PoreReduction::Excavation { level: ReductionLevel::Medium, reduction_kpa: 50.0 },
        );

        let buildings = job.buildings();
        assert_eq!(buildings.len(), 2);
        assert_eq!(buildings[0].attributes.foundation.as_deref(), Some("Stripefundament"));
        assert_eq!(buildings[1].attributes.condition.as_deref(), Some("good"));

        let sources = job.sources().unwrap();
        let bedrock = job.bedrock().unwrap();
        assert!(bedrock.is_some());

        let analysis = analyze_buildings(&sources, &buildings, &job.config, bedrock.as_ref()).unwrap();
        assert!(analysis.skipped.is_empty());
        assert_eq!(analysis.corners.len(), 8);
        assert!(analysis.buildings.iter().all(|b| b.undefined_corners == 0 && b.risk.is_some()));
    }

    #[test]
    fn excavation_sources_reject_alignments() {
        let mut source = square_pit();
        source["alignments"] = json!([[[0.0, 30.0], [20.0, 30.0]]]);
        let err = excavation_job(source, json!([])).sources().unwrap_err();
        assert!(err.to_string().contains("alignments"));
    }

    #[test]
    fn degenerate_source_polygon_is_an_error() {
        let source = json!({ "kind": "excavation", "polygons": [[[[0.0, 0.0], [20.0, 0.0], [0.0, 0.0]]]] });
        let err = excavation_job(source, json!([])).sources().unwrap_err();
        assert!(err.to_string().contains("source polygon 0"));
    }

    #[test]
    fn short_tunnel_alignment_is_an_error() {
        let source = json!({ "kind": "tunnel", "alignments": [[[0.0, 0.0]]] });
        let err = excavation_job(source, json!([])).sources().unwrap_err();
        assert!(err.to_string().contains("tunnel alignment 0"));
    }

    #[test]
    fn unreadable_buildings_keep_their_index() {
        let job = excavation_job(square_pit(), json!([
            { "id": "line", "rings": [[[30.0, 0.0], [40.0, 0.0]]] },
            { "id": "house", "rings": [[[30.0, 0.0], [40.0, 0.0], [40.0, 10.0], [30.0, 10.0]]], "structure": "Betong" },
            { "id": "nothing", "rings": [] },
        ]));

        let buildings = job.buildings();
        assert_eq!(buildings.len(), 3);
        assert_eq!(buildings[1].attributes.structure.as_deref(), Some("Betong"));

        let analysis = analyze_buildings(&job.sources().unwrap(), &buildings, &job.config, None).unwrap();
        let skipped: Vec<(usize, SkipReason)> = analysis.skipped.iter().map(|s| (s.building, s.reason)).collect();
        assert_eq!(skipped, vec![(0, SkipReason::TooFewCorners), (2, SkipReason::TooFewCorners)]);
        assert_eq!(analysis.buildings.len(), 1);
        assert_eq!(analysis.buildings[0].building_id, "house");
    }

    #[test]
    fn missing_bedrock_is_none() {
        assert!(excavation_job(square_pit(), json!([])).bedrock().unwrap().is_none());
    }
}
