use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::services::CategoryService;
use crate::features::property_photos::handlers::{self, PropertyPhotoState};
use crate::features::property_photos::services::PropertyPhotoService;

/// Public read routes for the property-photos feature
pub fn routes(
    photo_service: Arc<PropertyPhotoService>,
    category_service: Arc<CategoryService>,
) -> Router {
    let state = PropertyPhotoState {
        photo_service,
        category_service,
    };

    Router::new()
        .route("/api/property-photos", get(handlers::list_property_photos))
        .with_state(state)
}

/// Admin routes, nested under /api/admin by the server
pub fn admin_routes(
    photo_service: Arc<PropertyPhotoService>,
    category_service: Arc<CategoryService>,
) -> Router {
    let state = PropertyPhotoState {
        photo_service,
        category_service,
    };

    Router::new()
        .route("/property-photos", post(handlers::upload_property_photo))
        .route(
            "/property-photos/{id}",
            axum::routing::delete(handlers::delete_property_photo),
        )
        .with_state(state)
}
