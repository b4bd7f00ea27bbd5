use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;

const CATEGORY_COLUMNS: &str = "id, parent_id, name, slug, description, image_url, \
     display_order, is_active, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all active categories (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.load_active().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List all active categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.load_active().await?;
        Ok(CategoryTreeDto::build_tree(categories))
    }

    async fn load_active(&self) -> Result<Vec<Category>> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE is_active = TRUE \
             ORDER BY display_order, name"
        );
        let categories = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(categories)
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let category = self.find_by_slug(slug).await?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Look up an active category row by slug, None when absent
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE slug = $1 AND is_active = TRUE"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by slug: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(category)
    }

    /// Create a new category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let query = format!(
            "INSERT INTO categories (parent_id, name, slug, description, image_url, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(dto.parent_id)
            .bind(&dto.name)
            .bind(&dto.slug)
            .bind(&dto.description)
            .bind(&dto.image_url)
            .bind(dto.display_order)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Conflict(format!("Category slug '{}' already exists", dto.slug))
                }
                _ => {
                    tracing::error!("Failed to create category: {:?}", e);
                    AppError::Database(e)
                }
            })?;

        tracing::info!("Category created: id={}, slug={}", category.id, category.slug);

        Ok(category.into())
    }

    /// Update a category; absent fields stay unchanged
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let query = format!(
            "UPDATE categories SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 image_url = COALESCE($4, image_url), \
                 display_order = COALESCE($5, display_order), \
                 is_active = COALESCE($6, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.image_url)
            .bind(dto.display_order)
            .bind(dto.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category: {:?}", e);
                AppError::Database(e)
            })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    /// Soft-delete a category
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE categories SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete category: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category '{}' not found", id)));
        }

        tracing::info!("Category soft deleted: id={}", id);
        Ok(())
    }
}
