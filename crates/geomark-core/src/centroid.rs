//! Representative-coordinate derivation for canonical geometries.
//!
//! The value computed here is a *bounding-box midpoint*, not an area- or
//! length-weighted centroid of mass: per axis, `min + (max - min) / 2` over
//! every position in the geometry. Downstream consumers depend on this
//! simpler, sometimes off-center value, so do not upgrade it to a true
//! centroid without coordinating with them.

use crate::models::{CanonicalGeometry, Centroid};

/// Derive the representative coordinate of a geometry.
///
/// A geometry with exactly one position (a Point) yields that position
/// verbatim, bit-identical and unrounded. Everything else yields the
/// per-axis bounding-box midpoint rounded to 8 decimals. Duplicate closing
/// positions of polygon rings are included in the sweep; they cannot skew a
/// min/max-based midpoint.
pub fn centroid(geometry: &CanonicalGeometry) -> Centroid {
    let positions = geometry.positions();
    if let [position] = positions[..] {
        return Centroid { lon: position.lon, lat: position.lat };
    }

    // The sanitizer guarantees at least one position, so the folds below
    // always see a value.
    let mut min_lon = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    for position in &positions {
        min_lon = min_lon.min(position.lon);
        max_lon = max_lon.max(position.lon);
        min_lat = min_lat.min(position.lat);
        max_lat = max_lat.max(position.lat);
    }

    Centroid {
        lon: round8(min_lon + (max_lon - min_lon) / 2.0),
        lat: round8(min_lat + (max_lat - min_lat) / 2.0),
    }
}

/// Round to 8 decimals, half away from zero
fn round8(value: f64) -> f64 {
    (value * 1e8).round() / 1e8
}
