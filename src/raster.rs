use geo::{Coord, Rect};
use ndarray::Array2;

use crate::error::{ConfigError, Result};

/// A regular grid of depth-to-bedrock values (m), north-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    origin: Coord<f64>, // Top-left corner of the top-left cell
    cell_size: f64,
    data: Array2<f64>,  // (rows, cols), row 0 at the top
    nodata: Option<f64>,
}

impl Raster {
    /// Construct a raster from a row-major value array of `width × height` cells.
    pub fn new(origin: Coord<f64>, cell_size: f64, width: usize, height: usize, values: Vec<f64>, nodata: Option<f64>) -> Result<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(ConfigError::InvalidRaster(format!("cell size must be positive, got {cell_size}")));
        }
        if !(origin.x.is_finite() && origin.y.is_finite()) {
            return Err(ConfigError::InvalidRaster("origin must be finite".to_string()));
        }
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidRaster(format!("empty raster ({width} x {height})")));
        }
        if values.len() != width * height {
            return Err(ConfigError::InvalidRaster(format!(
                "expected {} values for {width} x {height} cells, got {}", width * height, values.len()
            )));
        }

        let data = Array2::from_shape_vec((height, width), values)
            .map_err(|e| ConfigError::InvalidRaster(e.to_string()))?;

        Ok(Self { origin, cell_size, data, nodata })
    }

    #[inline] pub fn width(&self) -> usize { self.data.ncols() }

    #[inline] pub fn height(&self) -> usize { self.data.nrows() }

    #[inline] pub fn cell_size(&self) -> f64 { self.cell_size }

    #[inline] pub fn nodata(&self) -> Option<f64> { self.nodata }

    /// Get a reference to the cell values.
    #[inline] pub fn data(&self) -> &Array2<f64> { &self.data }

    /// Rectangle covered by the raster.
    pub fn extent(&self) -> Rect<f64> {
        let w = self.width() as f64 * self.cell_size;
        let h = self.height() as f64 * self.cell_size;
        Rect::new(
            Coord { x: self.origin.x, y: self.origin.y - h },
            Coord { x: self.origin.x + w, y: self.origin.y },
        )
    }

    /// Row and column of the cell containing `p`, if inside the raster.
    pub fn cell_of(&self, p: Coord<f64>) -> Option<(usize, usize)> {
        let col = ((p.x - self.origin.x) / self.cell_size).floor();
        let row = ((self.origin.y - p.y) / self.cell_size).floor();
        if !(col >= 0.0 && row >= 0.0) { return None }

        let (row, col) = (row as usize, col as usize);
        (row < self.height() && col < self.width()).then_some((row, col))
    }

    /// Nearest-neighbour value at `p`. Outside the extent, nodata and non-finite cells give `None`.
    pub fn sample(&self, p: Coord<f64>) -> Option<f64> {
        let (row, col) = self.cell_of(p)?;
        let value = self.data[[row, col]];
        if !value.is_finite() || self.nodata == Some(value) { return None }
        Some(value)
    }
}
