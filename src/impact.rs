use geo::{Coord, Rect};
use log::{debug, info};
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::{
    config::AnalysisConfig,
    error::{ensure_non_negative, ensure_positive, ConfigError, Result},
    field::Component,
    geom::SourceIndex,
    raster::Raster,
};

/// Value written to cells with no settlement estimate.
pub const IMPACT_NODATA: f64 = -9999.0;

/// Upper bound on grid cells for one map.
const MAX_CELLS: usize = 100_000_000;

fn default_cell_size() -> f64 { 10.0 }
fn default_margin() -> f64 { 150.0 }

/// Resolution and extent of an impact map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactGridConfig {
    #[serde(default = "default_cell_size")]
    pub cell_size: f64, // m
    #[serde(default = "default_margin")]
    pub margin: f64,    // Distance the grid extends beyond the sources (m)
}

impl Default for ImpactGridConfig {
    fn default() -> Self {
        Self { cell_size: default_cell_size(), margin: default_margin() }
    }
}

impl ImpactGridConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("cell_size", self.cell_size)?;
        ensure_non_negative("margin", self.margin)
    }
}

/// Dense grid of total settlement (m) around the sources, north-up.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactGrid {
    origin: Coord<f64>, // Top-left corner
    cell_size: f64,
    data: Array2<f64>,  // (rows, cols), row 0 at the top
}

impl ImpactGrid {
    #[inline] pub fn origin(&self) -> Coord<f64> { self.origin }

    #[inline] pub fn cell_size(&self) -> f64 { self.cell_size }

    #[inline] pub fn width(&self) -> usize { self.data.ncols() }

    #[inline] pub fn height(&self) -> usize { self.data.nrows() }

    #[inline] pub fn nodata(&self) -> f64 { IMPACT_NODATA }

    /// Get a reference to the cell values, [`IMPACT_NODATA`] marking gaps.
    #[inline] pub fn data(&self) -> &Array2<f64> { &self.data }

    /// Settlement in cell (`row`, `col`), `None` for gaps and out-of-range indices.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied().filter(|&v| v != IMPACT_NODATA)
    }

    /// Center of cell (`row`, `col`).
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> Coord<f64> {
        cell_center(self.origin, self.cell_size, row, col)
    }

    pub fn extent(&self) -> Rect<f64> {
        Rect::new(
            Coord { x: self.origin.x, y: self.origin.y - self.height() as f64 * self.cell_size },
            Coord { x: self.origin.x + self.width() as f64 * self.cell_size, y: self.origin.y },
        )
    }

    /// Number of cells without an estimate.
    pub fn count_nodata(&self) -> usize {
        self.data.iter().filter(|&&v| v == IMPACT_NODATA).count()
    }
}

#[inline]
fn cell_center(origin: Coord<f64>, cell_size: f64, row: usize, col: usize) -> Coord<f64> {
    Coord {
        x: origin.x + (col as f64 + 0.5) * cell_size,
        y: origin.y - (row as f64 + 0.5) * cell_size,
    }
}

/// Evaluate total settlement at every cell center of a grid covering the sources'
/// bounding box grown by `grid.margin`.
///
/// When a bedrock raster is given, cells outside it (or on its nodata) are gaps, as are
/// cells whose long-term settlement is undefined. Cells are evaluated in parallel.
pub fn impact_map(
    sources: &SourceIndex,
    config: &AnalysisConfig,
    grid: &ImpactGridConfig,
    bedrock: Option<&Raster>,
) -> Result<ImpactGrid> {
    config.validate(sources.kind(), bedrock.is_some())?;
    grid.validate()?;

    let bounds = sources.bounds();
    let min = Coord { x: bounds.min().x - grid.margin, y: bounds.min().y - grid.margin };
    let max = Coord { x: bounds.max().x + grid.margin, y: bounds.max().y + grid.margin };

    let cols = ((max.x - min.x) / grid.cell_size).ceil().max(1.0);
    let rows = ((max.y - min.y) / grid.cell_size).ceil().max(1.0);
    if cols * rows > MAX_CELLS as f64 {
        return Err(ConfigError::range("cell_size", grid.cell_size, "too small for the source extent"));
    }
    let (rows, cols) = (rows as usize, cols as usize);

    let origin = Coord { x: min.x, y: max.y };
    let field = config.field();
    debug!("impact grid: {rows} x {cols} cells of {} m from ({}, {})", grid.cell_size, origin.x, origin.y);

    let mut data = Array2::<f64>::zeros((rows, cols));
    Zip::indexed(&mut data).par_for_each(|(row, col), value| {
        let center = cell_center(origin, grid.cell_size, row, col);
        let depth = bedrock.map(|raster| raster.sample(center));

        *value = match depth {
            Some(None) => IMPACT_NODATA,
            _ => match field.sample(sources.distance(center), depth.flatten()).total {
                Component::Value(s) => s,
                Component::Undefined => IMPACT_NODATA,
                Component::Disabled => 0.0,
            },
        };
    });

    let result = ImpactGrid { origin, cell_size: grid.cell_size, data };
    info!("impact map: {} cells, {} without estimate", rows * cols, result.count_nodata());
    Ok(result)
}
