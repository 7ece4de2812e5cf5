use async_trait::async_trait;
use geomark_core::error::Result;
use geomark_core::models::{Record, RecordDraft, RecordId};

/// Port for record storage operations.
///
/// Every write that carries geometry goes through the full
/// validate → sanitize → derive cycle as one atomic unit: either the
/// canonical feature and its centroid are both persisted, or nothing is.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Validate a draft and store it as a new record.
    /// A validation failure rejects the entire write; nothing is persisted.
    async fn create_record(&self, draft: RecordDraft) -> Result<Record>;

    /// Validate and store several drafts, all-or-nothing.
    /// If any draft fails validation the whole batch is rejected and the
    /// store is left untouched.
    async fn create_records(&self, drafts: Vec<RecordDraft>) -> Result<Vec<Record>>;

    /// Retrieve a record by ID
    async fn get_record(&self, id: RecordId) -> Result<Option<Record>>;

    /// List all records
    async fn list_records(&self) -> Result<Vec<Record>>;

    /// Replace a record's geometry with a freshly sanitized one, recomputing
    /// the centroid in the same step. On failure the previous canonical
    /// feature and centroid remain in place.
    async fn update_geometry(&self, id: RecordId, geojson: &str) -> Result<Record>;

    /// Delete a record
    async fn delete_record(&self, id: RecordId) -> Result<()>;
}
