use geo::{BoundingRect, Coord, LineString, Polygon, Rect};
use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, geom::{point_line_distance, point_polygon_distance}};

/// What kind of construction the sources describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Excavation,
    Tunnel,
}

impl SourceKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            SourceKind::Excavation => "excavation",
            SourceKind::Tunnel => "tunnel",
        }
    }
}

/// A single source footprint: an area (excavation pit, tunnel footprint)
/// or a tunnel centre line.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceGeometry {
    Area(Polygon<f64>),
    Alignment(LineString<f64>),
}

impl SourceGeometry {
    /// Distance from `p` to this geometry (zero inside an area).
    #[inline]
    pub fn distance(&self, p: Coord<f64>) -> f64 {
        match self {
            SourceGeometry::Area(polygon) => point_polygon_distance(p, polygon),
            SourceGeometry::Alignment(line) => point_line_distance(p, line),
        }
    }

    /// True when every vertex has finite coordinates.
    pub fn is_finite(&self) -> bool {
        let finite = |c: &Coord<f64>| c.x.is_finite() && c.y.is_finite();
        match self {
            SourceGeometry::Area(polygon) => std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .all(|ring| ring.coords().all(finite)),
            SourceGeometry::Alignment(line) => line.coords().all(finite),
        }
    }

    #[inline]
    fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            SourceGeometry::Area(polygon) => polygon.bounding_rect(),
            SourceGeometry::Alignment(line) => line.bounding_rect(),
        }
    }
}

/// R-tree entry: the envelope of one source geometry and its position in the source list.
#[derive(Debug, Clone)]
struct SourceEnvelope {
    shape: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for SourceEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope { self.envelope }
}

/// The set of source geometries of one analysis, with an R-tree for nearest-source queries.
#[derive(Debug, Clone)]
pub struct SourceIndex {
    kind: SourceKind,
    shapes: Vec<SourceGeometry>,
    rtree: RTree<SourceEnvelope>,
    bounds: Rect<f64>,
}

impl SourceIndex {
    /// Construct an index from source geometries. Geometries without extent are dropped;
    /// an empty result or a non-finite vertex is a configuration error.
    pub fn new(kind: SourceKind, geometries: Vec<SourceGeometry>) -> Result<Self, ConfigError> {
        if let Some(index) = geometries.iter().position(|geometry| !geometry.is_finite()) {
            return Err(ConfigError::NonFiniteSource { index });
        }

        let shapes: Vec<SourceGeometry> = geometries.into_iter()
            .filter(|geometry| geometry.bounding_rect().is_some())
            .collect();

        let rects: Vec<(usize, Rect<f64>)> = shapes.iter().enumerate()
            .filter_map(|(i, shape)| shape.bounding_rect().map(|rect| (i, rect)))
            .collect();

        let bounds = rects.iter()
            .map(|&(_, rect)| rect)
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
            .ok_or(ConfigError::NoSources)?;

        let envelopes = rects.into_iter()
            .map(|(shape, rect)| SourceEnvelope {
                shape,
                envelope: AABB::from_corners(rect.min().into(), rect.max().into()),
            })
            .collect();

        Ok(Self { kind, shapes, rtree: RTree::bulk_load(envelopes), bounds })
    }

    /// Index excavation pit polygons.
    pub fn excavations(polygons: Vec<Polygon<f64>>) -> Result<Self, ConfigError> {
        Self::new(SourceKind::Excavation, polygons.into_iter().map(SourceGeometry::Area).collect())
    }

    /// Get the kind of source.
    #[inline] pub fn kind(&self) -> SourceKind { self.kind }

    /// Get the number of source geometries.
    #[inline] pub fn len(&self) -> usize { self.shapes.len() }

    /// Check if there are no source geometries.
    #[inline] pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Get a reference to the source geometries.
    #[inline] pub fn shapes(&self) -> &[SourceGeometry] { &self.shapes }

    /// Bounding rectangle of all sources.
    #[inline] pub fn bounds(&self) -> Rect<f64> { self.bounds }

    /// Distance from `p` to the nearest source.
    ///
    /// Searches square windows of growing half-width `r` around `p`. Any geometry closer than
    /// `r` has a bounding box intersecting the window, so once the best distance found is
    /// within `r` (or the window covers every source) the answer is exact.
    pub fn distance(&self, p: Coord<f64>) -> f64 {
        let span = (self.bounds.width()).max(self.bounds.height()).max(1.0);
        let outside = (self.bounds.min().x - p.x).max(p.x - self.bounds.max().x).max(0.0)
            .hypot((self.bounds.min().y - p.y).max(p.y - self.bounds.max().y).max(0.0));
        let mut radius = (outside + span / 64.0).max(1e-3);

        loop {
            let window = AABB::from_corners([p.x - radius, p.y - radius], [p.x + radius, p.y + radius]);
            let best = self.rtree.locate_in_envelope_intersecting(&window)
                .map(|candidate| self.shapes[candidate.shape].distance(p))
                .fold(f64::INFINITY, f64::min);

            let covers_all = p.x - radius <= self.bounds.min().x && p.x + radius >= self.bounds.max().x
                && p.y - radius <= self.bounds.min().y && p.y + radius >= self.bounds.max().y;

            if best <= radius || covers_all { return best }
            radius *= 2.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use geo::{coord, polygon};

    use super::*;

    fn pits() -> SourceIndex {
        SourceIndex::excavations(vec![
            polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
            polygon![(x: 100.0, y: 0.0), (x: 110.0, y: 0.0), (x: 110.0, y: 10.0), (x: 100.0, y: 10.0)],
        ]).unwrap()
    }

    #[test]
    fn nearest_source_wins() {
        let index = pits();
        assert_eq!(index.len(), 2);
        assert_abs_diff_eq!(index.distance(coord! { x: 20.0, y: 5.0 }), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(index.distance(coord! { x: 95.0, y: 5.0 }), 5.0, epsilon = 1e-12);
        assert_eq!(index.distance(coord! { x: 105.0, y: 5.0 }), 0.0);
    }

    #[test]
    fn far_points_are_exact() {
        let index = pits();
        let d = index.distance(coord! { x: 55.0, y: -1000.0 });
        let expected = (45.0f64).hypot(1000.0);
        assert_abs_diff_eq!(d, expected, epsilon = 1e-9);
    }

    #[test]
    fn matches_brute_force() {
        let index = pits();
        for i in -20..20 {
            for j in -20..20 {
                let p = coord! { x: i as f64 * 7.3, y: j as f64 * 5.1 };
                let brute = index.shapes().iter().map(|s| s.distance(p)).fold(f64::INFINITY, f64::min);
                assert_abs_diff_eq!(index.distance(p), brute, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn alignment_sources() {
        let index = SourceIndex::new(
            SourceKind::Tunnel,
            vec![SourceGeometry::Alignment(LineString::from(vec![(0.0, 0.0), (200.0, 0.0)]))],
        ).unwrap();
        assert_eq!(index.kind(), SourceKind::Tunnel);
        assert_abs_diff_eq!(index.distance(coord! { x: 50.0, y: -12.5 }), 12.5, epsilon = 1e-12);
    }

    #[test]
    fn empty_sources_are_rejected() {
        assert_eq!(SourceIndex::excavations(vec![]).unwrap_err(), ConfigError::NoSources);
        let empty_line = SourceGeometry::Alignment(LineString::new(vec![]));
        assert!(SourceIndex::new(SourceKind::Tunnel, vec![empty_line]).is_err());
    }

    #[test]
    fn non_finite_sources_are_rejected() {
        let pit = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0)];
        let broken = polygon![(x: 20.0, y: 0.0), (x: f64::NAN, y: 0.0), (x: 30.0, y: 10.0)];
        assert_eq!(
            SourceIndex::excavations(vec![pit, broken]).unwrap_err(),
            ConfigError::NonFiniteSource { index: 1 },
        );

        let line = SourceGeometry::Alignment(LineString::from(vec![(0.0, 0.0), (f64::INFINITY, 0.0)]));
        assert_eq!(
            SourceIndex::new(SourceKind::Tunnel, vec![line]).unwrap_err(),
            ConfigError::NonFiniteSource { index: 0 },
        );
    }

    #[test]
    fn bounds_cover_all_sources() {
        let bounds = pits().bounds();
        assert_eq!(bounds.min(), coord! { x: 0.0, y: 0.0 });
        assert_eq!(bounds.max(), coord! { x: 110.0, y: 10.0 });
    }
}
