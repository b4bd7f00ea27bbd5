use std::path::PathBuf;

use sqlx::PgPool;

use crate::core::config::Config;
use crate::features::property_photos::services::OrphanAuditService;
use crate::maintenance::{report, EXIT_OK};
use crate::modules::uploads::UploadStore;

/// Audit the uploads photo directory for files no property-photo row
/// references. Read-only; the orphan list is persisted as an artifact.
pub async fn run(pool: &PgPool, config: &Config, out: Option<PathBuf>) -> anyhow::Result<i32> {
    let service = OrphanAuditService::new(
        pool.clone(),
        UploadStore::new(&config.uploads),
        config.uploads.photos_dir.clone(),
    );

    let audit = service.audit().await?;

    let out_path = report::resolve_out(&config.reports, out, "photo_orphans", "txt");
    let mut contents = format!(
        "# Unlinked property-photo files\n# scanned: {}, referenced: {}, unlinked: {}\n",
        audit.scanned_files,
        audit.referenced,
        audit.unlinked.len()
    );
    for name in &audit.unlinked {
        contents.push_str(name);
        contents.push('\n');
    }
    report::write_report(&out_path, &contents)?;

    println!(
        "Orphan audit: {} file(s) scanned, {} referenced, {} unlinked.",
        audit.scanned_files,
        audit.referenced,
        audit.unlinked.len()
    );
    println!("Report: {}", out_path.display());

    Ok(EXIT_OK)
}
