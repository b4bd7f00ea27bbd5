use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{
    CreateProductDto, ListProductsQuery, ProductResponseDto, UpdateProductDto,
};
use crate::features::products::models::Product;
use crate::shared::types::PaginationQuery;

const PRODUCT_COLUMNS: &str = "id, category_id, sku, name, description, price, currency, \
     properties_data, is_active, created_at, updated_at";

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List active products with pagination and optional category/search filters.
    ///
    /// Returns the page of products plus the total row count for the filter.
    pub async fn list(
        &self,
        query: &ListProductsQuery,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let search = query
            .search
            .as_deref()
            .map(|s| format!("%{}%", s.trim().to_lowercase()));

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p \
             WHERE p.is_active = TRUE \
               AND ($1::text IS NULL OR p.category_id = \
                    (SELECT id FROM categories WHERE slug = $1)) \
               AND ($2::text IS NULL OR lower(p.name) LIKE $2 OR lower(p.sku) LIKE $2) \
             ORDER BY p.name \
             LIMIT $3 OFFSET $4"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(&query.category)
            .bind(&search)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list products: {:?}", e);
                AppError::Database(e)
            })?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products p \
             WHERE p.is_active = TRUE \
               AND ($1::text IS NULL OR p.category_id = \
                    (SELECT id FROM categories WHERE slug = $1)) \
               AND ($2::text IS NULL OR lower(p.name) LIKE $2 OR lower(p.sku) LIKE $2)",
        )
        .bind(&query.category)
        .bind(&search)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((products.into_iter().map(|p| p.into()).collect(), total))
    }

    /// Get product by id
    pub async fn get(&self, id: Uuid) -> Result<ProductResponseDto> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND is_active = TRUE"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get product: {:?}", e);
                AppError::Database(e)
            })?;

        product
            .map(|p| p.into())
            .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", id)))
    }

    /// Create a new product
    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        let sql = format!(
            "INSERT INTO products \
                 (category_id, sku, name, description, price, currency, properties_data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(dto.category_id)
            .bind(&dto.sku)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.price)
            .bind(&dto.currency)
            .bind(&dto.properties_data)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Conflict(format!("Product sku '{}' already exists", dto.sku))
                }
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    AppError::BadRequest(format!("Unknown category '{}'", dto.category_id))
                }
                _ => {
                    tracing::error!("Failed to create product: {:?}", e);
                    AppError::Database(e)
                }
            })?;

        tracing::info!("Product created: id={}, sku={}", product.id, product.sku);

        Ok(product.into())
    }

    /// Update a product; absent fields stay unchanged
    pub async fn update(&self, id: Uuid, dto: UpdateProductDto) -> Result<ProductResponseDto> {
        let sql = format!(
            "UPDATE products SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 price = COALESCE($4, price), \
                 properties_data = COALESCE($5, properties_data), \
                 is_active = COALESCE($6, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.price)
            .bind(&dto.properties_data)
            .bind(dto.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update product: {:?}", e);
                AppError::Database(e)
            })?;

        product
            .map(|p| p.into())
            .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", id)))
    }

    /// Soft-delete a product
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result =
            sqlx::query("UPDATE products SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to delete product: {:?}", e);
                    AppError::Database(e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product '{}' not found", id)));
        }

        tracing::info!("Product soft deleted: id={}", id);
        Ok(())
    }
}
