pub mod feature;
pub mod record;

pub use feature::{CanonicalFeature, CanonicalGeometry, Centroid, Position};
pub use record::{ObservationKind, Record, RecordDraft, RecordId, RecordMetadata};
