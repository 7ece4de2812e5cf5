//! Export projections for canonical features.
//!
//! Two read-side serializations are derived from the canonical form: a
//! minimal schema.org geo mapping for structured-data consumers, and a
//! verbose GeoJSON rendition with properties re-attached from the owning
//! record. Both member names and the space-separated `"lat,lon"` string
//! format are a compatibility surface consumed by existing external tooling
//! and are reproduced verbatim.

use serde_json::{json, Value};

use crate::models::{CanonicalFeature, CanonicalGeometry, Position, RecordMetadata};

/// Project a canonical geometry onto the schema.org geo vocabulary.
///
/// Note the axis swap: schema.org wants latitude first, while the
/// interchange format stores (longitude, latitude). A Point becomes a
/// `schema:GeoCoordinates` node; LineString and Polygon become a
/// `schema:GeoShape` carrying a space-separated `"lat,lon"` string. Only a
/// polygon's exterior ring is represented; holes are intentionally not part
/// of this export.
pub fn to_schema_org(geometry: &CanonicalGeometry) -> Value {
    let geo = match geometry {
        CanonicalGeometry::Point { coordinates } => json!({
            "@type": "schema:GeoCoordinates",
            "schema:latitude": coordinates.lat,
            "schema:longitude": coordinates.lon,
        }),
        CanonicalGeometry::LineString { coordinates } => json!({
            "@type": "schema:GeoShape",
            "schema:line": join_lat_lon(coordinates),
        }),
        CanonicalGeometry::Polygon { coordinates } => json!({
            "@type": "schema:GeoShape",
            "schema:polygon": join_lat_lon(&coordinates[0]),
        }),
    };

    json!({
        "@type": "schema:Place",
        "schema:geo": geo,
    })
}

/// Space-separated "lat,lon" pairs, one per position, in original order
fn join_lat_lon(positions: &[Position]) -> String {
    positions
        .iter()
        .map(|p| format!("{},{}", fmt_coord(p.lat), fmt_coord(p.lon)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Coordinate text for the geo-shape strings. Whole-number coordinates keep
/// a trailing `.0` (external consumers parse `"10.0"`, not `"10"`).
fn fmt_coord(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Project a canonical feature to the verbose, property-annotated GeoJSON
/// rendition served to API consumers.
///
/// The canonical form intentionally carries no descriptive attributes, so a
/// fresh `properties` map is populated entirely from the owning record's
/// metadata; whatever the original submission carried in `properties` was
/// dropped at sanitization time and never resurfaces. `type` and `geometry`
/// are passed through untouched.
pub fn to_verbose(feature: &CanonicalFeature, metadata: &RecordMetadata) -> Value {
    let mut value = feature.to_value();
    value["properties"] = json!({
        "title": metadata.title,
        "description": metadata.description,
        "record_id": metadata.record_id,
        "creator": metadata.creator,
        "uri": metadata.uri,
        "observation_type": metadata.observation.coarse_label(),
    });
    value
}
