use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Public read routes for the products feature
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/{id}", get(handlers::get_product))
        .with_state(service)
}

/// Admin CRUD routes, nested under /api/admin by the server
pub fn admin_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/products", post(handlers::create_product))
        .route(
            "/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .with_state(service)
}
