use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::documents::handlers;
use crate::features::documents::services::DocumentService;

/// Create routes for the documents feature
pub fn routes(service: Arc<DocumentService>) -> Router {
    Router::new()
        .route(
            "/api/documents",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route(
            "/api/documents/{id}",
            get(handlers::get_document).delete(handlers::delete_document),
        )
        .route(
            "/api/documents/{id}/status",
            patch(handlers::update_document_status),
        )
        .route(
            "/api/documents/{id}/comments",
            post(handlers::create_document_comment),
        )
        .with_state(service)
}
