//! Geomark Core - Canonical feature model and the sanitize/derive pipeline
//!
//! This crate turns untrusted GeoJSON-like feature payloads into a minimal,
//! allow-listed canonical form and derives secondary data from it: a cached
//! representative coordinate and alternate export serializations. All
//! operations are pure, synchronous, and allocation-only.

pub mod centroid;
pub mod error;
pub mod export;
pub mod models;
pub mod sanitize;

pub use error::{GeomarkError, Result};
