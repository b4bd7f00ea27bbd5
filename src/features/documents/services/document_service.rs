use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::documents::dtos::{
    CommentResponseDto, CreateCommentDto, CreateDocumentDto, DocumentDetailDto,
    DocumentResponseDto, HistoryResponseDto, ListDocumentsQuery,
};
use crate::features::documents::models::{
    Document, DocumentComment, DocumentHistory, DocumentStatus, DocumentType,
};
use crate::shared::types::PaginationQuery;

const DOCUMENT_COLUMNS: &str = "id, doc_type, number, status, customer_name, customer_email, \
     total, currency, lines, created_at, updated_at";

/// Service for document lifecycle operations
pub struct DocumentService {
    pool: PgPool,
}

impl DocumentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a document with a generated number and a "created" history event
    pub async fn create(&self, dto: CreateDocumentDto) -> Result<DocumentResponseDto> {
        let number = generate_number(dto.doc_type);
        let total = dto.total();
        let lines = serde_json::to_value(&dto.lines)
            .map_err(|e| AppError::Internal(format!("Failed to serialize lines: {}", e)))?;

        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO documents \
                 (doc_type, number, customer_name, customer_email, total, currency, lines) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {DOCUMENT_COLUMNS}"
        );
        let document = sqlx::query_as::<_, Document>(&sql)
            .bind(dto.doc_type)
            .bind(&number)
            .bind(&dto.customer_name)
            .bind(&dto.customer_email)
            .bind(total)
            .bind(&dto.currency)
            .bind(&lines)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create document: {:?}", e);
                AppError::Database(e)
            })?;

        record_history(
            &mut tx,
            document.doc_type,
            document.id,
            "created",
            json!({ "number": document.number, "total": document.total }),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Document created: id={}, type={}, number={}",
            document.id,
            document.doc_type,
            document.number
        );

        Ok(document.into())
    }

    /// List documents with pagination and optional type/status filters
    pub async fn list(
        &self,
        query: &ListDocumentsQuery,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<DocumentResponseDto>, i64)> {
        let sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents \
             WHERE ($1::document_type IS NULL OR doc_type = $1) \
               AND ($2::document_status IS NULL OR status = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        let documents = sqlx::query_as::<_, Document>(&sql)
            .bind(query.doc_type)
            .bind(query.status)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list documents: {:?}", e);
                AppError::Database(e)
            })?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents \
             WHERE ($1::document_type IS NULL OR doc_type = $1) \
               AND ($2::document_status IS NULL OR status = $2)",
        )
        .bind(query.doc_type)
        .bind(query.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count documents: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((documents.into_iter().map(|d| d.into()).collect(), total))
    }

    /// Load the raw document row (used by the export pipeline)
    pub async fn get_model(&self, id: Uuid) -> Result<Document> {
        let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1");
        let document = sqlx::query_as::<_, Document>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get document: {:?}", e);
                AppError::Database(e)
            })?;

        document.ok_or_else(|| AppError::NotFound(format!("Document '{}' not found", id)))
    }

    /// Get a document with its comment and history trails
    pub async fn get_detail(&self, id: Uuid) -> Result<DocumentDetailDto> {
        let document = self.get_model(id).await?;

        let comments = sqlx::query_as::<_, DocumentComment>(
            "SELECT id, doc_type, document_id, author, body, created_at \
             FROM document_comments \
             WHERE doc_type = $1 AND document_id = $2 \
             ORDER BY created_at",
        )
        .bind(document.doc_type)
        .bind(document.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load document comments: {:?}", e);
            AppError::Database(e)
        })?;

        let history = sqlx::query_as::<_, DocumentHistory>(
            "SELECT id, doc_type, document_id, event, details, created_at \
             FROM document_history \
             WHERE doc_type = $1 AND document_id = $2 \
             ORDER BY created_at",
        )
        .bind(document.doc_type)
        .bind(document.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load document history: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(DocumentDetailDto {
            document: document.into(),
            comments: comments.into_iter().map(CommentResponseDto::from).collect(),
            history: history.into_iter().map(HistoryResponseDto::from).collect(),
        })
    }

    /// Apply a status transition, recording it in the history trail
    pub async fn update_status(
        &self,
        id: Uuid,
        status: DocumentStatus,
    ) -> Result<DocumentResponseDto> {
        let document = self.get_model(id).await?;

        if !document.status.can_transition(status) {
            return Err(AppError::BadRequest(format!(
                "Cannot move document '{}' from '{}' to '{}'",
                document.number, document.status, status
            )));
        }

        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "UPDATE documents SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {DOCUMENT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Document>(&sql)
            .bind(id)
            .bind(status)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update document status: {:?}", e);
                AppError::Database(e)
            })?;

        record_history(
            &mut tx,
            updated.doc_type,
            updated.id,
            "status_changed",
            json!({ "from": document.status, "to": status }),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Document status changed: id={}, {} -> {}",
            id,
            document.status,
            status
        );

        Ok(updated.into())
    }

    /// Add a comment to a document
    pub async fn add_comment(&self, id: Uuid, dto: CreateCommentDto) -> Result<CommentResponseDto> {
        let document = self.get_model(id).await?;

        let comment = sqlx::query_as::<_, DocumentComment>(
            "INSERT INTO document_comments (doc_type, document_id, author, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, doc_type, document_id, author, body, created_at",
        )
        .bind(document.doc_type)
        .bind(document.id)
        .bind(&dto.author)
        .bind(&dto.body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to add document comment: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(comment.into())
    }

    /// Delete a document and cascade-delete its comment and history trails.
    ///
    /// All three deletions run in one transaction; on any error nothing is
    /// removed.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let document = self.get_model(id).await?;

        let mut tx = self.pool.begin().await?;

        let comments =
            sqlx::query("DELETE FROM document_comments WHERE doc_type = $1 AND document_id = $2")
                .bind(document.doc_type)
                .bind(document.id)
                .execute(&mut *tx)
                .await?;

        let history =
            sqlx::query("DELETE FROM document_history WHERE doc_type = $1 AND document_id = $2")
                .bind(document.doc_type)
                .bind(document.id)
                .execute(&mut *tx)
                .await?;

        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(document.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Document deleted: id={}, number={}, comments={}, history={}",
            document.id,
            document.number,
            comments.rows_affected(),
            history.rows_affected()
        );

        Ok(())
    }
}

/// Generate a document number: `{PREFIX}-{YYYYMMDD}-{short id}`
fn generate_number(doc_type: DocumentType) -> String {
    let date = Utc::now().format("%Y%m%d");
    let short_id = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("{}-{}-{}", doc_type.number_prefix(), date, short_id)
}

async fn record_history(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    doc_type: DocumentType,
    document_id: Uuid,
    event: &str,
    details: serde_json::Value,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO document_history (doc_type, document_id, event, details) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(doc_type)
    .bind(document_id)
    .bind(event)
    .bind(details)
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to record document history: {:?}", e);
        AppError::Database(e)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_number_shape() {
        let number = generate_number(DocumentType::Order);
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 8);
    }

    #[test]
    fn test_generate_number_prefix_per_type() {
        assert!(generate_number(DocumentType::Quote).starts_with("Q-"));
        assert!(generate_number(DocumentType::Invoice).starts_with("INV-"));
        assert!(generate_number(DocumentType::SupplierOrder).starts_with("SO-"));
    }
}
