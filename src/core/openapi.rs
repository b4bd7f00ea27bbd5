use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::documents::{
    dtos as documents_dtos, handlers as documents_handlers, models as documents_models,
};
use crate::features::exports::handlers as exports_handlers;
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::property_photos::{dtos as photos_dtos, handlers as photos_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Property photos
        photos_handlers::list_property_photos,
        photos_handlers::upload_property_photo,
        photos_handlers::delete_property_photo,
        // Documents
        documents_handlers::create_document,
        documents_handlers::list_documents,
        documents_handlers::get_document,
        documents_handlers::update_document_status,
        documents_handlers::create_document_comment,
        documents_handlers::delete_document,
        // Exports
        exports_handlers::export_document_csv,
        exports_handlers::export_document_html,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Products
            products_dtos::ProductResponseDto,
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Property photos
            photos_dtos::PropertyPhotoResponseDto,
            photos_dtos::UploadPropertyPhotoDto,
            ApiResponse<Vec<photos_dtos::PropertyPhotoResponseDto>>,
            ApiResponse<photos_dtos::PropertyPhotoResponseDto>,
            // Documents
            documents_models::DocumentType,
            documents_models::DocumentStatus,
            documents_dtos::DocumentLineDto,
            documents_dtos::CreateDocumentDto,
            documents_dtos::UpdateDocumentStatusDto,
            documents_dtos::CreateCommentDto,
            documents_dtos::DocumentResponseDto,
            documents_dtos::DocumentDetailDto,
            documents_dtos::CommentResponseDto,
            documents_dtos::HistoryResponseDto,
            ApiResponse<Vec<documents_dtos::DocumentResponseDto>>,
            ApiResponse<documents_dtos::DocumentResponseDto>,
            ApiResponse<documents_dtos::DocumentDetailDto>,
            ApiResponse<documents_dtos::CommentResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Catalog category tree"),
        (name = "products", description = "Catalog products"),
        (name = "property-photos", description = "Property-to-photo associations"),
        (name = "documents", description = "Quotes, invoices, orders and supplier orders"),
        (name = "exports", description = "CSV/HTML document exports"),
    ),
    info(
        title = "Domeo Catalog API",
        version = "0.1.0",
        description = "API documentation for the Domeo catalog and document backend",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
