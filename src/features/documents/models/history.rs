use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::documents::models::DocumentType;

/// Database model for a document history event (polymorphic reference)
#[derive(Debug, Clone, FromRow)]
pub struct DocumentHistory {
    pub id: Uuid,
    pub doc_type: DocumentType,
    pub document_id: Uuid,
    pub event: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
