//! Catalog categories (interior doors, handles, accessories).
//!
//! Public read endpoints plus admin CRUD. Categories form a tree via
//! `parent_id`; deletion is a soft delete so products keep their reference.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::CategoryService;
