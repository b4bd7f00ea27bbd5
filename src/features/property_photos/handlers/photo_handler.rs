use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::services::CategoryService;
use crate::features::property_photos::dtos::{
    ListPropertyPhotosQuery, PropertyPhotoResponseDto, UploadPropertyPhotoDto,
    ALLOWED_PHOTO_MIME_TYPES, MAX_PHOTO_SIZE,
};
use crate::features::property_photos::services::{NewPropertyPhoto, PropertyPhotoService};
use crate::shared::constants::{PHOTO_TYPE_COVER, PHOTO_TYPE_GALLERY};
use crate::shared::types::ApiResponse;

/// Shared state for property-photo handlers
#[derive(Clone)]
pub struct PropertyPhotoState {
    pub photo_service: Arc<PropertyPhotoService>,
    pub category_service: Arc<CategoryService>,
}

/// List property photos of a category
#[utoipa::path(
    get,
    path = "/api/property-photos",
    params(ListPropertyPhotosQuery),
    responses(
        (status = 200, description = "List of property photos", body = ApiResponse<Vec<PropertyPhotoResponseDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "property-photos"
)]
pub async fn list_property_photos(
    State(state): State<PropertyPhotoState>,
    Query(query): Query<ListPropertyPhotosQuery>,
) -> Result<Json<ApiResponse<Vec<PropertyPhotoResponseDto>>>> {
    let category = state
        .category_service
        .find_by_slug(&query.category)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", query.category)))?;

    let photos = state
        .photo_service
        .list(category.id, query.property.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(Some(photos), None, None)))
}

/// Upload a property photo
///
/// Accepts multipart/form-data with:
/// - `file`: The image file (required)
/// - `category_id`: Owning category (required)
/// - `property_name`: Property axis, e.g. "color" (required)
/// - `property_value`: Composite value "model|finish|color" (required)
/// - `photo_type`: "cover" (default) or "gallery"
#[utoipa::path(
    post,
    path = "/api/admin/property-photos",
    request_body(
        content = UploadPropertyPhotoDto,
        content_type = "multipart/form-data",
        description = "Photo upload form",
    ),
    responses(
        (status = 201, description = "Photo uploaded", body = ApiResponse<PropertyPhotoResponseDto>),
        (status = 400, description = "Invalid file or missing field"),
        (status = 413, description = "File too large")
    ),
    tag = "property-photos"
)]
pub async fn upload_property_photo(
    State(state): State<PropertyPhotoState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PropertyPhotoResponseDto>>)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut category_id: Option<Uuid> = None;
    let mut property_name: Option<String> = None;
    let mut property_value: Option<String> = None;
    let mut photo_type = PHOTO_TYPE_COVER.to_string();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "category_id" => {
                let text = read_text_field(field, "category_id").await?;
                category_id = Some(
                    text.parse()
                        .map_err(|_| AppError::BadRequest("Invalid category_id".to_string()))?,
                );
            }
            "property_name" => {
                property_name = Some(read_text_field(field, "property_name").await?);
            }
            "property_value" => {
                property_value = Some(read_text_field(field, "property_value").await?);
            }
            "photo_type" => {
                let text = read_text_field(field, "photo_type").await?;
                photo_type = match text.to_lowercase().as_str() {
                    PHOTO_TYPE_GALLERY => PHOTO_TYPE_GALLERY.to_string(),
                    _ => PHOTO_TYPE_COVER.to_string(),
                };
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;
    let category_id =
        category_id.ok_or_else(|| AppError::BadRequest("category_id is required".to_string()))?;
    let property_name = property_name
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("property_name is required".to_string()))?;
    let property_value = property_value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("property_value is required".to_string()))?;

    if file_data.len() > MAX_PHOTO_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large: {} bytes (max {})",
            file_data.len(),
            MAX_PHOTO_SIZE
        )));
    }

    if !ALLOWED_PHOTO_MIME_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported content type '{}'",
            content_type
        )));
    }

    let photo = state
        .photo_service
        .upload(NewPropertyPhoto {
            category_id,
            property_name,
            property_value,
            photo_type,
            original_filename: file_name,
            mime_type: content_type,
            data: file_data,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(photo), None, None)),
    ))
}

/// Delete a property photo
#[utoipa::path(
    delete,
    path = "/api/admin/property-photos/{id}",
    params(
        ("id" = Uuid, Path, description = "Property photo id")
    ),
    responses(
        (status = 200, description = "Photo deleted"),
        (status = 404, description = "Photo not found")
    ),
    tag = "property-photos"
)]
pub async fn delete_property_photo(
    State(state): State<PropertyPhotoState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.photo_service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Property photo deleted".to_string()),
        None,
    )))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}
