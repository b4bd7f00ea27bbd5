use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::constants::PROPERTY_MODEL_CODE;

/// Builds the canonical model-code set for a category.
///
/// The set of distinct, non-empty `properties_data["model"]` values across
/// active products is the sole ground truth for which photo identity keys are
/// valid. Rows without the key, or with a non-string or blank value, simply
/// contribute nothing.
pub struct ModelCodeService {
    pool: PgPool,
}

impl ModelCodeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Collect the canonical model codes of all active products in a category
    pub async fn canonical_codes(&self, category_id: Uuid) -> Result<HashSet<String>> {
        let rows = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT properties_data FROM products \
             WHERE category_id = $1 AND is_active = TRUE",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load product properties: {:?}", e);
            AppError::Database(e)
        })?;

        let mut codes = HashSet::new();
        for properties in &rows {
            if let Some(code) = extract_model_code(properties) {
                codes.insert(code.to_string());
            }
        }

        tracing::info!(
            "Canonical code set built: category={}, products={}, codes={}",
            category_id,
            rows.len(),
            codes.len()
        );

        Ok(codes)
    }
}

/// Extract the trimmed canonical model code from a free-form property mapping
pub fn extract_model_code(properties: &serde_json::Value) -> Option<&str> {
    let code = properties.get(PROPERTY_MODEL_CODE)?.as_str()?.trim();
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_model_code() {
        let properties = json!({"model": "DomeoDoors_Base_1", "color": "Белый"});
        assert_eq!(extract_model_code(&properties), Some("DomeoDoors_Base_1"));
    }

    #[test]
    fn test_extract_model_code_trims() {
        let properties = json!({"model": "  H204  "});
        assert_eq!(extract_model_code(&properties), Some("H204"));
    }

    #[test]
    fn test_extract_model_code_missing_or_blank() {
        assert_eq!(extract_model_code(&json!({})), None);
        assert_eq!(extract_model_code(&json!({"model": ""})), None);
        assert_eq!(extract_model_code(&json!({"model": "   "})), None);
        // Non-string values contribute nothing
        assert_eq!(extract_model_code(&json!({"model": 42})), None);
        assert_eq!(extract_model_code(&json!({"model": null})), None);
    }
}
