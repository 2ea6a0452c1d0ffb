mod distance;
mod ring;
mod sources;

pub use distance::{inclination, point_line_distance, point_polygon_distance, point_segment_distance};
pub use ring::{is_self_intersecting, polygon_from_rings, ring_corners};
pub use sources::{SourceGeometry, SourceIndex, SourceKind};
