use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Document kind enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "document_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Quote,
    Invoice,
    Order,
    SupplierOrder,
}

impl DocumentType {
    /// Prefix used in generated document numbers
    pub fn number_prefix(&self) -> &'static str {
        match self {
            DocumentType::Quote => "Q",
            DocumentType::Invoice => "INV",
            DocumentType::Order => "ORD",
            DocumentType::SupplierOrder => "SO",
        }
    }

    /// Human-readable document title used by the export pipeline
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::Quote => "Коммерческое предложение",
            DocumentType::Invoice => "Счёт",
            DocumentType::Order => "Заказ",
            DocumentType::SupplierOrder => "Заказ поставщику",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Quote => write!(f, "quote"),
            DocumentType::Invoice => write!(f, "invoice"),
            DocumentType::Order => write!(f, "order"),
            DocumentType::SupplierOrder => write!(f, "supplier_order"),
        }
    }
}

/// Document status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "document_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Sent,
    Confirmed,
    Completed,
    Cancelled,
}

impl DocumentStatus {
    /// Whether a document may move from `self` to `to`.
    ///
    /// Statuses only move forward; cancellation is allowed from any
    /// non-terminal status.
    pub fn can_transition(&self, to: DocumentStatus) -> bool {
        use DocumentStatus::*;

        match (self, to) {
            (Draft, Sent) => true,
            (Draft, Cancelled) | (Sent, Cancelled) | (Confirmed, Cancelled) => true,
            (Sent, Confirmed) => true,
            (Confirmed, Completed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Draft => write!(f, "draft"),
            DocumentStatus::Sent => write!(f, "sent"),
            DocumentStatus::Confirmed => write!(f, "confirmed"),
            DocumentStatus::Completed => write!(f, "completed"),
            DocumentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Database model for a document
#[derive(Debug, Clone, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub doc_type: DocumentType,
    pub number: String,
    pub status: DocumentStatus,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub total: Decimal,
    pub currency: String,
    /// Cart positions, rendered by the export pipeline
    pub lines: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions_forward_only() {
        use DocumentStatus::*;

        assert!(Draft.can_transition(Sent));
        assert!(Sent.can_transition(Confirmed));
        assert!(Confirmed.can_transition(Completed));

        assert!(!Sent.can_transition(Draft));
        assert!(!Completed.can_transition(Confirmed));
        assert!(!Draft.can_transition(Completed));
    }

    #[test]
    fn test_cancellation_from_non_terminal_only() {
        use DocumentStatus::*;

        assert!(Draft.can_transition(Cancelled));
        assert!(Sent.can_transition(Cancelled));
        assert!(Confirmed.can_transition(Cancelled));

        assert!(!Completed.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(Cancelled));
    }
}
