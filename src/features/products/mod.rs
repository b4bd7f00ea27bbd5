//! Catalog products.
//!
//! A product's `properties_data` is a free-form JSON mapping; its `"model"`
//! key carries the canonical model code. The set of distinct model codes
//! across active products of a category is the ground truth the photo
//! deduplication job validates against.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{ModelCodeService, ProductService};
