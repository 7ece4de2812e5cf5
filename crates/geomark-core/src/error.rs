//! Error types for Geomark

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeomarkError {
    // Raw-text errors (earlier stage than structural validation)
    #[error("Input is not parseable JSON: {reason}")]
    UnparsableInput { reason: String },

    // Structural validation errors. All of these are permanent: the same
    // input will always fail the same way, so no retry policy applies.
    #[error("Input must be a JSON object")]
    NotAMapping,

    #[error("Input must be a GeoJSON object of type 'Feature'")]
    NotAFeature,

    #[error("Feature 'geometry' must be present and a JSON object")]
    MissingOrInvalidGeometry,

    #[error("Unsupported geometry type '{kind}'. Supported: Point, LineString, Polygon")]
    UnsupportedGeometryKind { kind: String },

    #[error("'coordinates' member is required for geometry type '{kind}'")]
    MissingCoordinates { kind: String },

    #[error("Point 'coordinates' must be a list of 2 or 3 numbers")]
    InvalidPointCoordinates,

    #[error("LineString 'coordinates' must be a list of 2 or more positions")]
    InvalidLineStringCoordinates,

    #[error("Polygon 'coordinates' must be a non-empty list of linear rings")]
    InvalidPolygonCoordinates,

    #[error("Polygon ring {ring} has {len} positions, at least 4 are required")]
    RingTooShort { ring: usize, len: usize },

    #[error("Polygon ring {ring} is not closed (first and last position must be identical)")]
    RingNotClosed { ring: usize },

    // Store errors
    #[error("Record not found: {id}")]
    RecordNotFound { id: u64 },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, GeomarkError>;
