//! Property-to-photo associations.
//!
//! A `property_value` is a `|`-delimited composite string whose first segment
//! (the identity key) should be a canonical model code; the rest are finish
//! and color descriptors. Historical imports were inconsistent about the
//! first segment, so the feature carries the maintenance services that
//! reconcile rows against the product model codes, audit the uploads
//! directory for unlinked files, and diagnose stale stored paths.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod property_value;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{
    OrphanAuditService, PathCheckService, PhotoDedupService, PropertyPhotoService,
};
