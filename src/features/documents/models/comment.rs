use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::documents::models::DocumentType;

/// Database model for a document comment (polymorphic reference)
#[derive(Debug, Clone, FromRow)]
pub struct DocumentComment {
    pub id: Uuid,
    pub doc_type: DocumentType,
    pub document_id: Uuid,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
