//! Geomark Store - Record persistence around the canonical feature pipeline
//!
//! The store is the write-side gatekeeper: no raw geometry is accepted
//! without a full sanitization cycle, and the cached centroid is recomputed
//! in the same step as every geometry change. A stored record can therefore
//! never be inconsistent with its centroid.

pub mod memory;
pub mod ports;

pub use memory::MemoryRecordStore;
pub use ports::RecordStore;
