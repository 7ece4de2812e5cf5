//! Record types: the entity owning a canonical feature.
//!
//! A record stores the canonical feature as its authoritative geometry
//! together with a cached centroid. The centroid is recomputed whenever the
//! geometry changes and never edited independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::feature::{CanonicalFeature, Centroid};

/// Unique identifier for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the observation behind a record was made.
///
/// Stored as the internal two-letter codes. The verbose export collapses
/// these into a coarse two-way label: field observations are `"field"`,
/// remote and machine observations are both `"remote"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationKind {
    /// Observation made through one or more field visits
    #[serde(rename = "FO")]
    Field,
    /// Observation made at a distance, without a field visit
    #[serde(rename = "RO")]
    Remote,
    /// Observation made by a program through data analysis
    #[serde(rename = "MO")]
    Machine,
}

impl ObservationKind {
    /// The internal storage code
    pub fn code(&self) -> &'static str {
        match self {
            ObservationKind::Field => "FO",
            ObservationKind::Remote => "RO",
            ObservationKind::Machine => "MO",
        }
    }

    /// Coarse human-readable label used by the verbose export
    pub fn coarse_label(&self) -> &'static str {
        match self {
            ObservationKind::Field => "field",
            ObservationKind::Remote | ObservationKind::Machine => "remote",
        }
    }
}

/// Descriptive attributes attached to a feature by the verbose export.
///
/// The canonical form intentionally carries no attribute data, so callers
/// that need attributes supply them out-of-band through this bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub title: String,
    pub description: String,
    /// Public identifier of the owning record
    pub record_id: String,
    /// Handle of the user who created the record
    pub creator: String,
    /// Externally resolvable URI for the record
    pub uri: String,
    pub observation: ObservationKind,
}

/// A stored record: descriptive fields plus the canonical feature and its
/// cached centroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub creator: String,
    pub observation: ObservationKind,
    pub feature: CanonicalFeature,
    pub centroid: Centroid,
    pub created_at: DateTime<Utc>,
    pub changed_at: DateTime<Utc>,
}

impl Record {
    /// Relative URL path of this record
    pub fn path(&self) -> String {
        format!("/record/{}", self.id)
    }

    /// Build the out-of-band property bundle for the verbose export.
    /// `base_url` is the public origin the record resolves under, without a
    /// trailing slash.
    pub fn metadata(&self, base_url: &str) -> RecordMetadata {
        RecordMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            record_id: self.id.to_string(),
            creator: self.creator.clone(),
            uri: format!("{}{}", base_url, self.path()),
            observation: self.observation,
        }
    }
}

/// Input for creating or updating a record. The geometry is raw interchange
/// text and is only accepted after a full sanitization cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDraft {
    pub title: String,
    pub description: String,
    pub creator: String,
    pub observation: ObservationKind,
    /// Raw GeoJSON feature text, as submitted
    pub geojson: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_kind_codes_round_trip() {
        for kind in [
            ObservationKind::Field,
            ObservationKind::Remote,
            ObservationKind::Machine,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
            let parsed: ObservationKind = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_coarse_label_collapses_machine_into_remote() {
        assert_eq!(ObservationKind::Field.coarse_label(), "field");
        assert_eq!(ObservationKind::Remote.coarse_label(), "remote");
        assert_eq!(ObservationKind::Machine.coarse_label(), "remote");
    }

    #[test]
    fn test_record_metadata_builds_resolvable_uri() {
        use crate::models::{CanonicalGeometry, Position};

        let now = Utc::now();
        let record = Record {
            id: RecordId(42),
            title: "Clearance cairn".to_string(),
            description: "A small clearance cairn in pasture".to_string(),
            creator: "surveyor".to_string(),
            observation: ObservationKind::Remote,
            feature: CanonicalFeature::new(CanonicalGeometry::point(Position::new(13.0, 60.0))),
            centroid: Centroid { lon: 13.0, lat: 60.0 },
            created_at: now,
            changed_at: now,
        };

        let metadata = record.metadata("https://geomark.example");
        assert_eq!(metadata.record_id, "42");
        assert_eq!(metadata.uri, "https://geomark.example/record/42");
        assert_eq!(metadata.observation, ObservationKind::Remote);
        assert_eq!(metadata.title, record.title);
    }
}
