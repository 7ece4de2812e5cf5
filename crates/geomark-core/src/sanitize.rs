//! Structural validation and sanitization of raw feature payloads.
//!
//! Input arrives as a loosely-typed JSON tree from users and third parties.
//! [`sanitize`] walks that tree through a fixed sequence of hard gates and,
//! on success, constructs a fresh [`CanonicalFeature`] containing only the
//! allow-listed members `{type, geometry, properties}`. Everything else in
//! the input (ids, bounding boxes, CRS hints, foreign members, and the
//! entire contents of `properties`) is dropped at every nesting depth:
//! arbitrary user content must never reach the canonical store.
//!
//! The first failing gate wins; there are no partial results and the input
//! is never mutated.

use serde_json::Value;
use tracing::debug;

use crate::error::{GeomarkError, Result};
use crate::models::{CanonicalFeature, CanonicalGeometry, Position};

/// Sanitize raw interchange text.
///
/// Text that is not parseable JSON at all is reported as
/// [`GeomarkError::UnparsableInput`], distinct from the structural errors,
/// so callers can tell "not JSON" apart from "JSON but not an acceptable
/// Feature".
pub fn sanitize_str(raw: &str) -> Result<CanonicalFeature> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        debug!(error = %e, "rejecting unparsable feature payload");
        GeomarkError::UnparsableInput { reason: e.to_string() }
    })?;
    sanitize(&value)
}

/// Sanitize a raw JSON tree into the canonical feature form.
///
/// Gates, applied in order:
/// 1. the input is a JSON object
/// 2. `type` equals `"Feature"` (case-sensitive)
/// 3. `geometry` is present and an object
/// 4. the geometry `type` is `Point`, `LineString`, or `Polygon`; the other
///    standard GeoJSON kinds are a deliberate product restriction and are
///    rejected with the offending kind
/// 5. `coordinates` is present and not null
/// 6. the coordinate array has the right shape for the geometry kind;
///    polygon rings must have at least 4 positions and be closed (exact
///    component-wise equality of first and last position, no epsilon)
pub fn sanitize(raw: &Value) -> Result<CanonicalFeature> {
    let feature = raw.as_object().ok_or(GeomarkError::NotAMapping)?;

    if feature.get("type").and_then(Value::as_str) != Some("Feature") {
        return Err(GeomarkError::NotAFeature);
    }

    let geometry = feature
        .get("geometry")
        .and_then(Value::as_object)
        .ok_or(GeomarkError::MissingOrInvalidGeometry)?;

    let kind_name = geometry
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| GeomarkError::UnsupportedGeometryKind {
            kind: geometry.get("type").unwrap_or(&Value::Null).to_string(),
        })?;

    // The kind gate comes before the coordinates gate: an unsupported kind
    // is rejected as such even when coordinates are also absent
    let kind = match kind_name {
        "Point" => GeometryKind::Point,
        "LineString" => GeometryKind::LineString,
        "Polygon" => GeometryKind::Polygon,
        other => {
            return Err(GeomarkError::UnsupportedGeometryKind { kind: other.to_string() });
        }
    };

    let coordinates = match geometry.get("coordinates") {
        Some(value) if !value.is_null() => value,
        _ => {
            return Err(GeomarkError::MissingCoordinates { kind: kind_name.to_string() });
        }
    };

    let geometry = match kind {
        GeometryKind::Point => CanonicalGeometry::point(sanitize_point(coordinates)?),
        GeometryKind::LineString => {
            CanonicalGeometry::line_string(sanitize_line_string(coordinates)?)
        }
        GeometryKind::Polygon => CanonicalGeometry::polygon(sanitize_polygon(coordinates)?),
    };

    Ok(CanonicalFeature::new(geometry))
}

/// The three supported geometry kinds, resolved before any coordinate work
#[derive(Debug, Clone, Copy)]
enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

/// Parse one position: an array of exactly 2 or 3 numbers
fn parse_position(value: &Value) -> Option<Position> {
    let parts = value.as_array()?;
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let lon = parts[0].as_f64()?;
    let lat = parts[1].as_f64()?;
    let elevation = match parts.get(2) {
        Some(part) => Some(part.as_f64()?),
        None => None,
    };

    Some(Position { lon, lat, elevation })
}

fn sanitize_point(coordinates: &Value) -> Result<Position> {
    parse_position(coordinates).ok_or(GeomarkError::InvalidPointCoordinates)
}

fn sanitize_line_string(coordinates: &Value) -> Result<Vec<Position>> {
    let positions = coordinates
        .as_array()
        .ok_or(GeomarkError::InvalidLineStringCoordinates)?
        .iter()
        .map(parse_position)
        .collect::<Option<Vec<_>>>()
        .ok_or(GeomarkError::InvalidLineStringCoordinates)?;

    if positions.len() < 2 {
        return Err(GeomarkError::InvalidLineStringCoordinates);
    }
    Ok(positions)
}

fn sanitize_polygon(coordinates: &Value) -> Result<Vec<Vec<Position>>> {
    let rings = coordinates
        .as_array()
        .ok_or(GeomarkError::InvalidPolygonCoordinates)?;
    if rings.is_empty() {
        return Err(GeomarkError::InvalidPolygonCoordinates);
    }

    // Ring-level failures are reported per ring; processing stops at the
    // first bad ring.
    rings
        .iter()
        .enumerate()
        .map(|(index, ring)| sanitize_ring(index, ring))
        .collect()
}

fn sanitize_ring(index: usize, ring: &Value) -> Result<Vec<Position>> {
    let positions = ring
        .as_array()
        .ok_or(GeomarkError::InvalidPolygonCoordinates)?
        .iter()
        .map(parse_position)
        .collect::<Option<Vec<_>>>()
        .ok_or(GeomarkError::InvalidPolygonCoordinates)?;

    if positions.len() < 4 {
        return Err(GeomarkError::RingTooShort { ring: index, len: positions.len() });
    }

    // Exact equality, no epsilon tolerance
    if positions.first() != positions.last() {
        return Err(GeomarkError::RingNotClosed { ring: index });
    }

    Ok(positions)
}
