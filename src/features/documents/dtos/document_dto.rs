use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::documents::models::{
    Document, DocumentComment, DocumentHistory, DocumentStatus, DocumentType,
};

/// One cart position of a document
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLineDto {
    #[validate(length(min = 1, max = 500, message = "Line name must be 1-500 characters"))]
    pub name: String,

    /// Canonical model code of the configured product, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,

    pub price: Decimal,
}

impl DocumentLineDto {
    pub fn amount(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Request DTO for creating a document
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentDto {
    pub doc_type: DocumentType,

    #[validate(length(max = 255, message = "Customer name must not exceed 255 characters"))]
    pub customer_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub customer_email: Option<String>,

    /// ISO 4217 code, defaults to RUB
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,

    #[validate(nested, length(min = 1, message = "A document needs at least one line"))]
    pub lines: Vec<DocumentLineDto>,
}

fn default_currency() -> String {
    "RUB".to_string()
}

impl CreateDocumentDto {
    /// Sum of line amounts
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.amount()).sum()
    }
}

/// Request DTO for a status transition
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentStatusDto {
    pub status: DocumentStatus,
}

/// Request DTO for adding a comment
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentDto {
    #[validate(length(min = 1, max = 255, message = "Author must be 1-255 characters"))]
    pub author: String,

    #[validate(length(min = 1, max = 5000, message = "Comment must be 1-5000 characters"))]
    pub body: String,
}

/// Query params for listing documents
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListDocumentsQuery {
    /// Filter by document kind
    pub doc_type: Option<DocumentType>,

    /// Filter by status
    pub status: Option<DocumentStatus>,
}

/// Response DTO for a document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub doc_type: DocumentType,
    pub number: String,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub total: Decimal,
    pub currency: String,
    pub lines: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponseDto {
    fn from(d: Document) -> Self {
        Self {
            id: d.id,
            doc_type: d.doc_type,
            number: d.number,
            status: d.status,
            customer_name: d.customer_name,
            customer_email: d.customer_email,
            total: d.total,
            currency: d.currency,
            lines: d.lines,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Response DTO for a comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<DocumentComment> for CommentResponseDto {
    fn from(c: DocumentComment) -> Self {
        Self {
            id: c.id,
            author: c.author,
            body: c.body,
            created_at: c.created_at,
        }
    }
}

/// Response DTO for a history event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponseDto {
    pub id: Uuid,
    pub event: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<DocumentHistory> for HistoryResponseDto {
    fn from(h: DocumentHistory) -> Self {
        Self {
            id: h.id,
            event: h.event,
            details: h.details,
            created_at: h.created_at,
        }
    }
}

/// Document with its comment and history trails
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetailDto {
    #[serde(flatten)]
    pub document: DocumentResponseDto,
    pub comments: Vec<CommentResponseDto>,
    pub history: Vec<HistoryResponseDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_line_amount_and_total() {
        let dto = CreateDocumentDto {
            doc_type: DocumentType::Order,
            customer_name: None,
            customer_email: None,
            currency: "RUB".to_string(),
            lines: vec![
                DocumentLineDto {
                    name: "Дверь DomeoDoors_Base_1".to_string(),
                    model: Some("DomeoDoors_Base_1".to_string()),
                    quantity: 2,
                    price: Decimal::new(12_500_00, 2), // 12500.00
                },
                DocumentLineDto {
                    name: "Ручка H204".to_string(),
                    model: Some("H204".to_string()),
                    quantity: 1,
                    price: Decimal::new(1_990_00, 2),
                },
            ],
        };

        assert_eq!(dto.lines[0].amount(), Decimal::new(25_000_00, 2));
        assert_eq!(dto.total(), Decimal::new(26_990_00, 2));
    }
}
