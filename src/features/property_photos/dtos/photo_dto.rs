use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::property_photos::models::PropertyPhoto;
use crate::features::property_photos::property_value::{descriptors, identity_key};

/// Response DTO for a property photo
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPhotoResponseDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub property_name: String,
    pub property_value: String,
    /// First segment of the property value (canonical model code when valid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_code: Option<String>,
    /// Finish/color descriptor segments following the identity key
    pub descriptors: Vec<String>,
    pub photo_path: String,
    pub photo_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PropertyPhoto> for PropertyPhotoResponseDto {
    fn from(p: PropertyPhoto) -> Self {
        let model_code = identity_key(&p.property_value).map(|k| k.to_string());
        let value_descriptors = descriptors(&p.property_value)
            .into_iter()
            .map(|d| d.to_string())
            .collect();
        Self {
            id: p.id,
            category_id: p.category_id,
            property_name: p.property_name,
            property_value: p.property_value,
            model_code,
            descriptors: value_descriptors,
            photo_path: p.photo_path,
            photo_type: p.photo_type,
            original_filename: p.original_filename,
            file_size: p.file_size,
            mime_type: p.mime_type,
            created_at: p.created_at,
        }
    }
}

/// Query params for listing property photos
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListPropertyPhotosQuery {
    /// Category slug (required)
    pub category: String,

    /// Restrict to one property axis (e.g. "color")
    pub property: Option<String>,
}

/// Upload request DTO for OpenAPI documentation.
/// The handler reads the multipart form directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadPropertyPhotoDto {
    /// The image file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Category id owning the photo
    pub category_id: String,
    /// Property axis (e.g. "color")
    pub property_name: String,
    /// Composite value, "model|finish|color"
    pub property_value: String,
    /// "cover" (default) or "gallery"
    pub photo_type: Option<String>,
}

/// Allowed MIME types for photo uploads
pub const ALLOWED_PHOTO_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum photo size in bytes (15MB)
pub const MAX_PHOTO_SIZE: usize = 15 * 1024 * 1024;
