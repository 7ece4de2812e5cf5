//! In-memory storage implementation for development and testing.
//!
//! This implementation uses `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state.
//!
//! Atomicity of the "sanitize, persist canonical form, recompute centroid"
//! sequence is enforced by ordering: all fallible work happens before any
//! mutation, so a rejected payload leaves the store exactly as it was.

use async_trait::async_trait;
use chrono::Utc;
use geomark_core::centroid::centroid;
use geomark_core::error::{GeomarkError, Result};
use geomark_core::models::{CanonicalFeature, Centroid, Record, RecordDraft, RecordId};
use geomark_core::sanitize::sanitize_str;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::ports::RecordStore;

/// In-memory implementation of [`RecordStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<RwLock<HashMap<RecordId, Record>>>,
    next_id: Arc<RwLock<u64>>,
}

impl MemoryRecordStore {
    /// Create a new in-memory record store
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the sanitize/derive pipeline on a draft's raw geometry
    fn validate_geometry(draft: &RecordDraft) -> Result<(CanonicalFeature, Centroid)> {
        let feature = sanitize_str(&draft.geojson)?;
        let center = centroid(feature.geometry());
        Ok((feature, center))
    }

    fn assemble(id: RecordId, draft: RecordDraft, feature: CanonicalFeature, center: Centroid) -> Record {
        let now = Utc::now();
        Record {
            id,
            title: draft.title,
            description: draft.description,
            creator: draft.creator,
            observation: draft.observation,
            feature,
            centroid: center,
            created_at: now,
            changed_at: now,
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create_record(&self, draft: RecordDraft) -> Result<Record> {
        // Validate before touching any state
        let (feature, center) = Self::validate_geometry(&draft)?;

        let mut next_id = self.next_id.write().unwrap();
        let mut records = self.records.write().unwrap();
        *next_id += 1;
        let id = RecordId(*next_id);

        let record = Self::assemble(id, draft, feature, center);
        debug!(id = id.0, kind = record.feature.geometry().kind(), "created record");
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn create_records(&self, drafts: Vec<RecordDraft>) -> Result<Vec<Record>> {
        // All-or-nothing: validate the whole batch before any insert
        let mut validated = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let (feature, center) = Self::validate_geometry(&draft)?;
            validated.push((draft, feature, center));
        }

        let mut next_id = self.next_id.write().unwrap();
        let mut records = self.records.write().unwrap();
        let mut created = Vec::with_capacity(validated.len());
        for (draft, feature, center) in validated {
            *next_id += 1;
            let id = RecordId(*next_id);
            let record = Self::assemble(id, draft, feature, center);
            records.insert(id, record.clone());
            created.push(record);
        }
        debug!(count = created.len(), "created record batch");
        Ok(created)
    }

    async fn get_record(&self, id: RecordId) -> Result<Option<Record>> {
        Ok(self.records.read().unwrap().get(&id).cloned())
    }

    async fn list_records(&self) -> Result<Vec<Record>> {
        let mut records: Vec<Record> = self.records.read().unwrap().values().cloned().collect();
        records.sort_by_key(|record| record.id.0);
        Ok(records)
    }

    async fn update_geometry(&self, id: RecordId, geojson: &str) -> Result<Record> {
        // Full re-validation cycle; the stored feature and centroid are only
        // replaced together, after validation succeeded
        let feature = sanitize_str(geojson)?;
        let center = centroid(feature.geometry());

        let mut records = self.records.write().unwrap();
        let record = records
            .get_mut(&id)
            .ok_or(GeomarkError::RecordNotFound { id: id.0 })?;

        record.feature = feature;
        record.centroid = center;
        record.changed_at = Utc::now();
        debug!(id = id.0, kind = record.feature.geometry().kind(), "updated record geometry");
        Ok(record.clone())
    }

    async fn delete_record(&self, id: RecordId) -> Result<()> {
        let mut records = self.records.write().unwrap();
        records
            .remove(&id)
            .ok_or(GeomarkError::RecordNotFound { id: id.0 })?;
        debug!(id = id.0, "deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomark_core::models::ObservationKind;

    fn point_draft(geojson: &str) -> RecordDraft {
        RecordDraft {
            title: "Hollow way".to_string(),
            description: "Sunken track crossing the ridge".to_string(),
            creator: "surveyor".to_string(),
            observation: ObservationKind::Field,
            geojson: geojson.to_string(),
        }
    }

    const POINT: &str =
        r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[13.0743,60.5963]}}"#;

    #[tokio::test]
    async fn test_create_sanitizes_and_caches_centroid() {
        let store = MemoryRecordStore::new();
        let record = store.create_record(point_draft(POINT)).await.unwrap();

        assert_eq!(record.centroid.lon, 13.0743);
        assert_eq!(record.centroid.lat, 60.5963);

        let fetched = store.get_record(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.feature, record.feature);
        assert_eq!(fetched.centroid, record.centroid);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft_without_persisting() {
        let store = MemoryRecordStore::new();
        let result = store
            .create_record(point_draft(r#"{"type":"Feature","geometry":null}"#))
            .await;

        assert_eq!(result.unwrap_err(), GeomarkError::MissingOrInvalidGeometry);
        assert!(store.list_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_create_is_all_or_nothing() {
        let store = MemoryRecordStore::new();
        let result = store
            .create_records(vec![
                point_draft(POINT),
                point_draft("not json at all"),
            ])
            .await;

        assert!(matches!(result, Err(GeomarkError::UnparsableInput { .. })));
        assert!(store.list_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_geometry_replaces_feature_and_centroid_together() {
        let store = MemoryRecordStore::new();
        let record = store.create_record(point_draft(POINT)).await.unwrap();

        let line =
            r#"{"type":"Feature","geometry":{"type":"LineString","coordinates":[[10,20],[30,40]]}}"#;
        let updated = store.update_geometry(record.id, line).await.unwrap();

        assert_eq!(updated.feature.geometry().kind(), "LineString");
        assert_eq!((updated.centroid.lon, updated.centroid.lat), (20.0, 30.0));
        assert!(updated.changed_at >= record.changed_at);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_previous_state_intact() {
        let store = MemoryRecordStore::new();
        let record = store.create_record(point_draft(POINT)).await.unwrap();

        let bad =
            r#"{"type":"Feature","geometry":{"type":"MultiPoint","coordinates":[[1,2]]}}"#;
        let result = store.update_geometry(record.id, bad).await;
        assert_eq!(
            result.unwrap_err(),
            GeomarkError::UnsupportedGeometryKind { kind: "MultiPoint".to_string() }
        );

        let fetched = store.get_record(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.feature, record.feature);
        assert_eq!(fetched.centroid, record.centroid);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = MemoryRecordStore::new();
        let result = store.update_geometry(RecordId(99), POINT).await;
        assert_eq!(result.unwrap_err(), GeomarkError::RecordNotFound { id: 99 });
    }

    #[tokio::test]
    async fn test_delete_record() {
        let store = MemoryRecordStore::new();
        let record = store.create_record(point_draft(POINT)).await.unwrap();

        store.delete_record(record.id).await.unwrap();
        assert!(store.get_record(record.id).await.unwrap().is_none());
        assert_eq!(
            store.delete_record(record.id).await.unwrap_err(),
            GeomarkError::RecordNotFound { id: record.id.0 }
        );
    }

    #[tokio::test]
    async fn test_stored_record_serves_verbose_export() {
        let store = MemoryRecordStore::new();
        let record = store.create_record(point_draft(POINT)).await.unwrap();

        let metadata = record.metadata("https://geomark.example");
        let verbose = geomark_core::export::to_verbose(&record.feature, &metadata);

        assert_eq!(verbose["type"], "Feature");
        assert_eq!(verbose["properties"]["title"], "Hollow way");
        assert_eq!(verbose["properties"]["observation_type"], "field");
        assert_eq!(
            verbose["properties"]["uri"],
            format!("https://geomark.example/record/{}", record.id)
        );
    }

    #[tokio::test]
    async fn test_list_records_is_ordered_by_id() {
        let store = MemoryRecordStore::new();
        for _ in 0..3 {
            store.create_record(point_draft(POINT)).await.unwrap();
        }
        let records = store.list_records().await.unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, [1, 2, 3]);
    }
}
