use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::property_photos::dtos::PropertyPhotoResponseDto;
use crate::features::property_photos::models::PropertyPhoto;
use crate::modules::uploads::UploadStore;

const PHOTO_COLUMNS: &str = "id, category_id, property_name, property_value, photo_path, \
     photo_type, original_filename, file_size, mime_type, created_at, updated_at";

/// Data for registering an uploaded property photo
#[derive(Debug)]
pub struct NewPropertyPhoto {
    pub category_id: Uuid,
    pub property_name: String,
    pub property_value: String,
    pub photo_type: String,
    pub original_filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Service for property-photo CRUD
pub struct PropertyPhotoService {
    pool: PgPool,
    store: UploadStore,
    photos_dir: String,
}

impl PropertyPhotoService {
    pub fn new(pool: PgPool, store: UploadStore, photos_dir: String) -> Self {
        Self {
            pool,
            store,
            photos_dir,
        }
    }

    /// List photos of a category, optionally restricted to one property axis
    pub async fn list(
        &self,
        category_id: Uuid,
        property_name: Option<&str>,
    ) -> Result<Vec<PropertyPhotoResponseDto>> {
        let sql = format!(
            "SELECT {PHOTO_COLUMNS} FROM property_photos \
             WHERE category_id = $1 \
               AND ($2::text IS NULL OR property_name = $2) \
             ORDER BY property_name, property_value"
        );
        let photos = sqlx::query_as::<_, PropertyPhoto>(&sql)
            .bind(category_id)
            .bind(property_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list property photos: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(photos.into_iter().map(|p| p.into()).collect())
    }

    /// Persist an uploaded photo file and its association row
    pub async fn upload(&self, new: NewPropertyPhoto) -> Result<PropertyPhotoResponseDto> {
        let file_size = new.data.len() as i64;

        let extension = new
            .original_filename
            .rsplit('.')
            .next()
            .filter(|ext| !ext.is_empty())
            .unwrap_or("bin");
        let relative = format!(
            "{}/{}/{}.{}",
            self.photos_dir,
            new.category_id,
            Uuid::new_v4(),
            extension
        );

        self.store.save(&relative, &new.data).await?;
        let photo_path = self.store.public_url(&relative);

        let sql = format!(
            "INSERT INTO property_photos \
                 (category_id, property_name, property_value, photo_path, photo_type, \
                  original_filename, file_size, mime_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PHOTO_COLUMNS}"
        );
        let photo = sqlx::query_as::<_, PropertyPhoto>(&sql)
            .bind(new.category_id)
            .bind(&new.property_name)
            .bind(&new.property_value)
            .bind(&photo_path)
            .bind(&new.photo_type)
            .bind(&new.original_filename)
            .bind(file_size)
            .bind(&new.mime_type)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    AppError::BadRequest(format!("Unknown category '{}'", new.category_id))
                }
                _ => {
                    tracing::error!("Failed to save property photo: {:?}", e);
                    AppError::Database(e)
                }
            })?;

        tracing::info!(
            "Property photo saved: id={}, path={}, size={}",
            photo.id,
            photo.photo_path,
            file_size
        );

        Ok(photo.into())
    }

    /// Delete an association row and, best effort, its file
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let photo_path = sqlx::query_scalar::<_, String>(
            "DELETE FROM property_photos WHERE id = $1 RETURNING photo_path",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete property photo: {:?}", e);
            AppError::Database(e)
        })?;

        let photo_path = photo_path
            .ok_or_else(|| AppError::NotFound(format!("Property photo '{}' not found", id)))?;

        let relative = self.store.strip_public_prefix(&photo_path).to_string();
        if let Err(e) = self.store.remove(&relative).await {
            // The row is already gone; a stale file is the orphan audit's job
            tracing::warn!("Failed to remove photo file '{}': {}", relative, e);
        }

        tracing::info!("Property photo deleted: id={}", id);
        Ok(())
    }
}
