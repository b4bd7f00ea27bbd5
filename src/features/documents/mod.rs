//! Document lifecycle: quotes, invoices, orders and supplier orders.
//!
//! Comments and history events reference documents polymorphically by
//! `(doc_type, document_id)`; deleting a document removes both trails in the
//! same transaction.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DocumentService;
