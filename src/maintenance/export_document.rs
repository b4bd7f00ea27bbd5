use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::Config;
use crate::features::documents::services::DocumentService;
use crate::features::exports::services::ExportService;
use crate::maintenance::{report, EXIT_OK};

/// Write the CSV export artifact for one document
pub async fn run(
    pool: &PgPool,
    config: &Config,
    id: Uuid,
    out: Option<PathBuf>,
) -> anyhow::Result<i32> {
    let service = ExportService::new(Arc::new(DocumentService::new(pool.clone())));

    let (document, csv) = service.document_csv(id).await?;

    let out_path = match out {
        Some(path) => path,
        None => config.reports.out_dir.join(format!("{}.csv", document.number)),
    };
    report::write_report(&out_path, &csv)?;

    println!(
        "Exported {} '{}' to {}",
        document.doc_type,
        document.number,
        out_path.display()
    );

    Ok(EXIT_OK)
}
