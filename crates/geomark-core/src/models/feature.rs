//! Canonical geometry and feature types.
//!
//! These types are the authoritative representation produced by
//! [`crate::sanitize`]. They serialize to exactly the allow-listed GeoJSON
//! shape `{type, geometry, properties}` and nothing else, so serializing a
//! [`CanonicalFeature`] and sanitizing the result is a fixed point.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single coordinate tuple in interchange order: longitude, latitude, and
/// an optional elevation. Elevation is carried through storage but ignored
/// by centroid and export logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
    pub elevation: Option<f64>,
}

impl Position {
    /// Create a 2D position
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat, elevation: None }
    }

    /// Create a 3D position with elevation
    pub fn with_elevation(lon: f64, lat: f64, elevation: f64) -> Self {
        Self { lon, lat, elevation: Some(elevation) }
    }
}

// Positions are bare JSON arrays of 2 or 3 numbers, not maps, so serde
// derive does not fit here.
impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.elevation.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.lon)?;
        seq.serialize_element(&self.lat)?;
        if let Some(elevation) = self.elevation {
            seq.serialize_element(&elevation)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PositionVisitor;

        impl<'de> Visitor<'de> for PositionVisitor {
            type Value = Position;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array of 2 or 3 numbers")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Position, A::Error> {
                let lon: f64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let lat: f64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let elevation: Option<f64> = seq.next_element()?;
                if seq.next_element::<f64>()?.is_some() {
                    return Err(de::Error::invalid_length(4, &self));
                }
                Ok(Position { lon, lat, elevation })
            }
        }

        deserializer.deserialize_seq(PositionVisitor)
    }
}

/// Canonical geometry representation.
///
/// This enum directly maps to the three supported GeoJSON geometry types.
/// Multi-geometries and geometry collections are rejected upstream by the
/// sanitizer; keeping the union closed makes every downstream dispatch an
/// exhaustive, compile-time-checked match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CanonicalGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        /// Linear rings: exterior first, then holes. Each ring is closed
        /// (first position == last position) and has at least 4 positions.
        coordinates: Vec<Vec<Position>>,
    },
}

impl CanonicalGeometry {
    /// Create a Point geometry
    pub fn point(position: Position) -> Self {
        CanonicalGeometry::Point { coordinates: position }
    }

    /// Create a LineString geometry
    pub fn line_string(positions: Vec<Position>) -> Self {
        CanonicalGeometry::LineString { coordinates: positions }
    }

    /// Create a Polygon geometry
    pub fn polygon(rings: Vec<Vec<Position>>) -> Self {
        CanonicalGeometry::Polygon { coordinates: rings }
    }

    /// The GeoJSON type name of this geometry
    pub fn kind(&self) -> &'static str {
        match self {
            CanonicalGeometry::Point { .. } => "Point",
            CanonicalGeometry::LineString { .. } => "LineString",
            CanonicalGeometry::Polygon { .. } => "Polygon",
        }
    }

    /// All positions reachable from this geometry, in coordinate order.
    /// For polygons this includes every ring and the duplicate closing
    /// positions.
    pub fn positions(&self) -> Vec<Position> {
        match self {
            CanonicalGeometry::Point { coordinates } => vec![*coordinates],
            CanonicalGeometry::LineString { coordinates } => coordinates.clone(),
            CanonicalGeometry::Polygon { coordinates } => {
                coordinates.iter().flatten().copied().collect()
            }
        }
    }
}

/// The sanitized, authoritative feature representation.
///
/// Invariants, upheld by construction:
/// - `type` is always `"Feature"`
/// - `geometry` is always one of the three canonical variants, never null
/// - `properties` is always an empty map; descriptive attributes belong to
///   the owning record, not the geometry payload
/// - no other members exist (no id, no bbox, no foreign members)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalFeature {
    #[serde(rename = "type")]
    kind: FeatureKind,
    geometry: CanonicalGeometry,
    properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum FeatureKind {
    Feature,
}

// Deserialization is only meant for data this system wrote itself. It still
// re-checks the invariants instead of trusting the source: untrusted input
// goes through the sanitizer, never through serde.
impl<'de> Deserialize<'de> for CanonicalFeature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        enum RawKind {
            Feature,
        }

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct RawFeature {
            #[serde(rename = "type")]
            #[allow(dead_code)]
            kind: RawKind,
            geometry: CanonicalGeometry,
            properties: serde_json::Map<String, serde_json::Value>,
        }

        let raw = RawFeature::deserialize(deserializer)?;
        if !raw.properties.is_empty() {
            return Err(de::Error::custom(
                "canonical feature 'properties' must be an empty map",
            ));
        }
        Ok(CanonicalFeature::new(raw.geometry))
    }
}

impl CanonicalFeature {
    /// Wrap a canonical geometry in the canonical feature shape
    pub fn new(geometry: CanonicalGeometry) -> Self {
        Self {
            kind: FeatureKind::Feature,
            geometry,
            properties: serde_json::Map::new(),
        }
    }

    pub fn geometry(&self) -> &CanonicalGeometry {
        &self.geometry
    }

    /// Serialize to the canonical JSON tree
    pub fn to_value(&self) -> serde_json::Value {
        // Serialization of these types cannot fail
        serde_json::to_value(self).expect("canonical feature serializes")
    }

    /// Serialize to the canonical JSON text stored by the persistence layer
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("canonical feature serializes")
    }
}

/// A derived representative coordinate: the bounding-box midpoint of all
/// positions in a geometry, rounded to 8 decimals. Not a center of mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub lon: f64,
    pub lat: f64,
}
