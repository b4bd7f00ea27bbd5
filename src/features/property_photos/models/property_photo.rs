use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a property-to-photo association.
///
/// At most one authoritative row is intended per
/// (category_id, property_name, property_value, photo_type); historical
/// imports violated that, which is what the dedup job reconciles.
#[derive(Debug, Clone, FromRow)]
pub struct PropertyPhoto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub property_name: String,
    pub property_value: String,
    pub photo_path: String,
    pub photo_type: String,
    pub original_filename: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
