use geo::{Contains, Coord, LineString, Point, Polygon};

/// Separation below which two corners are considered coincident.
const MIN_SEPARATION: f64 = 1e-9;

/// Returns the minimum distance from `p` to the segment from `a` to `b`.
#[must_use]
pub fn point_segment_distance(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d = b - a;
    let len_sq = d.x * d.x + d.y * d.y;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p.x - a.x).hypot(p.y - a.y);
    }

    // Project onto the infinite line, clamp to the segment.
    let t = (((p.x - a.x) * d.x + (p.y - a.y) * d.y) / len_sq).clamp(0.0, 1.0);
    let closest = a + d * t;

    (p.x - closest.x).hypot(p.y - closest.y)
}

/// Minimum distance from `p` to any segment of `line`.
#[must_use]
pub fn point_line_distance(p: Coord<f64>, line: &LineString<f64>) -> f64 {
    match line.0.as_slice() {
        [] => f64::INFINITY,
        [only] => (p.x - only.x).hypot(p.y - only.y),
        _ => line.lines()
            .map(|segment| point_segment_distance(p, segment.start, segment.end))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Distance from `p` to a polygon: zero inside, otherwise the distance to the nearest ring edge.
/// Winding order does not matter.
#[must_use]
pub fn point_polygon_distance(p: Coord<f64>, polygon: &Polygon<f64>) -> f64 {
    if polygon.contains(&Point::from(p)) { return 0.0 }

    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| point_line_distance(p, ring))
        .fold(f64::INFINITY, f64::min)
}

/// Signed slope angle (radians) between two corners given their settlements.
/// Positive when `b` settles more than `a`. Returns `None` for coincident corners,
/// non-finite coordinates or non-finite settlements.
#[must_use]
pub fn inclination(a: Coord<f64>, b: Coord<f64>, settlement_a: f64, settlement_b: f64) -> Option<f64> {
    let separation = (b.x - a.x).hypot(b.y - a.y);
    if !separation.is_finite() || separation < MIN_SEPARATION { return None }
    if !settlement_a.is_finite() || !settlement_b.is_finite() { return None }
    Some((settlement_b - settlement_a).atan2(separation))
}
