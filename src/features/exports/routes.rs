use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::exports::handlers;
use crate::features::exports::services::ExportService;

/// Create routes for the exports feature
pub fn routes(service: Arc<ExportService>) -> Router {
    Router::new()
        .route(
            "/api/documents/{id}/export/csv",
            get(handlers::export_document_csv),
        )
        .route(
            "/api/documents/{id}/export/html",
            get(handlers::export_document_html),
        )
        .with_state(service)
}
