use geo::{Coord, Intersects, Line, LineString, Polygon};

/// Build a polygon from plain coordinate rings (outer ring first, then holes).
/// Rings are closed if needed; returns `None` when the outer ring has fewer than 3 distinct points.
/// Degenerate holes are dropped.
pub fn polygon_from_rings(rings: &[Vec<[f64; 2]>]) -> Option<Polygon<f64>> {
    /// Convert a ring to a closed LineString, or None if it encloses no area.
    fn closed_ring(points: &[[f64; 2]]) -> Option<LineString<f64>> {
        let coords: Vec<Coord<f64>> = points.iter().map(|&[x, y]| Coord { x, y }).collect();
        let ring = LineString::from(coords);
        let mut corners = ring_corners(&ring);
        if corners.len() < 3 { return None }
        corners.push(corners[0]);
        Some(LineString::from(corners))
    }

    let (outer, holes) = rings.split_first()?;
    Some(Polygon::new(
        closed_ring(outer)?,
        holes.iter().filter_map(|hole| closed_ring(hole)).collect(),
    ))
}

/// Distinct vertices of a ring in ring order, without the closing duplicate
/// and without consecutive repeats.
pub fn ring_corners(ring: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut corners: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for &c in &ring.0 {
        if corners.last() != Some(&c) { corners.push(c) }
    }
    while corners.len() > 1 && corners.first() == corners.last() {
        corners.pop();
    }
    corners
}

/// Returns true if any two non-adjacent edges of the (closed) ring intersect.
pub fn is_self_intersecting(ring: &LineString<f64>) -> bool {
    let corners = ring_corners(ring);
    let n = corners.len();
    if n < 4 { return false }

    let edges: Vec<Line<f64>> = (0..n)
        .map(|i| Line::new(corners[i], corners[(i + 1) % n]))
        .collect();

    (0..n).any(|i| {
        (i + 2..n)
            .filter(|&j| !(i == 0 && j == n - 1)) // first and last edge share a vertex
            .any(|j| edges[i].intersects(&edges[j]))
    })
}

#[cfg(test)]
mod tests {
    use geo::{coord, CoordsIter};

    use super::*;

    fn square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]
    }

    #[test]
    fn open_ring_is_closed_on_load() {
        let polygon = polygon_from_rings(&[square()]).unwrap();
        let exterior = polygon.exterior();
        assert_eq!(exterior.0.len(), 5);
        assert_eq!(exterior.0.first(), exterior.0.last());
    }

    #[test]
    fn closed_ring_is_kept() {
        let mut ring = square();
        ring.push([0.0, 0.0]);
        let polygon = polygon_from_rings(&[ring]).unwrap();
        assert_eq!(polygon.exterior().coords_count(), 5);
    }

    #[test]
    fn degenerate_outer_ring_is_rejected() {
        assert!(polygon_from_rings(&[]).is_none());
        assert!(polygon_from_rings(&[vec![[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]).is_none());
    }

    #[test]
    fn degenerate_hole_is_dropped() {
        let polygon = polygon_from_rings(&[square(), vec![[2.0, 2.0], [3.0, 3.0]]]).unwrap();
        assert!(polygon.interiors().is_empty());
    }

    #[test]
    fn corners_skip_repeats() {
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(
            ring_corners(&ring),
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }]
        );
    }

    #[test]
    fn bow_tie_is_self_intersecting() {
        let bow_tie = LineString::from(vec![(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]);
        assert!(is_self_intersecting(&bow_tie));
    }

    #[test]
    fn simple_rectangle_is_not_self_intersecting() {
        let rect = LineString::from(vec![(0.0, 0.0), (20.0, 0.0), (20.0, 8.0), (0.0, 8.0), (0.0, 0.0)]);
        assert!(!is_self_intersecting(&rect));
        let triangle = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert!(!is_self_intersecting(&triangle));
    }
}
