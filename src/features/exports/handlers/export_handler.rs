use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
    response::Html,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::exports::services::ExportService;

/// Export a document's lines as CSV
#[utoipa::path(
    get,
    path = "/api/documents/{id}/export/csv",
    params(
        ("id" = Uuid, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "CSV rows of the document", body = String, content_type = "text/csv"),
        (status = 404, description = "Document not found")
    ),
    tag = "exports"
)]
pub async fn export_document_csv(
    State(service): State<Arc<ExportService>>,
    Path(id): Path<Uuid>,
) -> Result<(HeaderMap, String)> {
    let (document, csv) = service.document_csv(id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{}.csv\"", document.number);
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((headers, csv))
}

/// Render a document as the HTML fed to the external PDF renderer
#[utoipa::path(
    get,
    path = "/api/documents/{id}/export/html",
    params(
        ("id" = Uuid, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "Printable HTML document", body = String, content_type = "text/html"),
        (status = 404, description = "Document not found")
    ),
    tag = "exports"
)]
pub async fn export_document_html(
    State(service): State<Arc<ExportService>>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let html = service.document_html(id).await?;
    Ok(Html(html))
}
