use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::documents::dtos::{
    CommentResponseDto, CreateCommentDto, CreateDocumentDto, DocumentDetailDto,
    DocumentResponseDto, ListDocumentsQuery, UpdateDocumentStatusDto,
};
use crate::features::documents::services::DocumentService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Create a document
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentDto,
    responses(
        (status = 201, description = "Document created", body = ApiResponse<DocumentResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "documents"
)]
pub async fn create_document(
    State(service): State<Arc<DocumentService>>,
    AppJson(dto): AppJson<CreateDocumentDto>,
) -> Result<(StatusCode, Json<ApiResponse<DocumentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let document = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(document), None, None)),
    ))
}

/// List documents
#[utoipa::path(
    get,
    path = "/api/documents",
    params(ListDocumentsQuery, PaginationQuery),
    responses(
        (status = 200, description = "Page of documents", body = ApiResponse<Vec<DocumentResponseDto>>),
    ),
    tag = "documents"
)]
pub async fn list_documents(
    State(service): State<Arc<DocumentService>>,
    Query(query): Query<ListDocumentsQuery>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<DocumentResponseDto>>>> {
    let (documents, total) = service.list(&query, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(documents),
        None,
        Some(Meta { total }),
    )))
}

/// Get a document with comments and history
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    params(
        ("id" = Uuid, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "Document found", body = ApiResponse<DocumentDetailDto>),
        (status = 404, description = "Document not found")
    ),
    tag = "documents"
)]
pub async fn get_document(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DocumentDetailDto>>> {
    let detail = service.get_detail(id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Apply a status transition
#[utoipa::path(
    patch,
    path = "/api/documents/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Document id")
    ),
    request_body = UpdateDocumentStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<DocumentResponseDto>),
        (status = 400, description = "Invalid transition"),
        (status = 404, description = "Document not found")
    ),
    tag = "documents"
)]
pub async fn update_document_status(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateDocumentStatusDto>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    let document = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(document), None, None)))
}

/// Add a comment to a document
#[utoipa::path(
    post,
    path = "/api/documents/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Document id")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<CommentResponseDto>),
        (status = 404, description = "Document not found")
    ),
    tag = "documents"
)]
pub async fn create_document_comment(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let comment = service.add_comment(id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment), None, None)),
    ))
}

/// Delete a document and its comment/history trails
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(
        ("id" = Uuid, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "Document deleted"),
        (status = 404, description = "Document not found")
    ),
    tag = "documents"
)]
pub async fn delete_document(
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Document deleted".to_string()),
        None,
    )))
}
