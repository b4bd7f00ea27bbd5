use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::products::models::Product;
use crate::shared::constants::PROPERTY_MODEL_CODE;
use crate::shared::validation::MODEL_CODE_REGEX;

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub sku: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub properties_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            category_id: p.category_id,
            sku: p.sku,
            name: p.name,
            description: p.description,
            price: p.price,
            currency: p.currency,
            properties_data: p.properties_data,
            created_at: p.created_at,
        }
    }
}

/// Query params for listing products
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListProductsQuery {
    /// Filter by category slug
    pub category: Option<String>,

    /// Case-insensitive substring match against name or sku
    pub search: Option<String>,
}

/// Request DTO for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    pub category_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "SKU must be 1-100 characters"))]
    pub sku: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub description: Option<String>,

    pub price: Decimal,

    /// ISO 4217 code, defaults to RUB
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,

    /// Free-form property mapping; the "model" key should hold the canonical model code
    #[serde(default = "default_properties")]
    #[validate(custom(function = validate_properties_model_code))]
    pub properties_data: serde_json::Value,
}

fn default_currency() -> String {
    "RUB".to_string()
}

fn default_properties() -> serde_json::Value {
    serde_json::json!({})
}

/// A "model" key, when present and non-blank, must be a well-formed model
/// code; photo identity keys are matched against it verbatim
fn validate_properties_model_code(properties: &serde_json::Value) -> Result<(), ValidationError> {
    if let Some(code) = properties.get(PROPERTY_MODEL_CODE).and_then(|v| v.as_str()) {
        let code = code.trim();
        if !code.is_empty() && !MODEL_CODE_REGEX.is_match(code) {
            return Err(ValidationError::new("model_code_format"));
        }
    }
    Ok(())
}

/// Request DTO for updating a product; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub price: Option<Decimal>,

    #[validate(custom(function = validate_properties_model_code))]
    pub properties_data: Option<serde_json::Value>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_code_validation() {
        assert!(validate_properties_model_code(&json!({})).is_ok());
        assert!(validate_properties_model_code(&json!({"model": "DomeoDoors_Base_1"})).is_ok());
        // Blank codes are ignored here; the set builder skips them anyway
        assert!(validate_properties_model_code(&json!({"model": "  "})).is_ok());
        assert!(validate_properties_model_code(&json!({"model": "Дверь ДГ"})).is_err());
    }
}
