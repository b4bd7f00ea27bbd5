use sqlx::PgPool;

use crate::core::config::Config;
use crate::features::property_photos::services::PathCheckService;
use crate::maintenance::{require_category, EXIT_OK};
use crate::modules::uploads::UploadStore;

/// Read-only diagnostic: check stored photo paths of a category against the
/// uploads directory, probing the legacy directory name too.
pub async fn run(
    pool: &PgPool,
    config: &Config,
    category_slug: &str,
    prefix: Option<&str>,
) -> anyhow::Result<i32> {
    let category = require_category(pool, category_slug).await?;

    let service = PathCheckService::new(
        pool.clone(),
        UploadStore::new(&config.uploads),
        config.uploads.photos_dir.clone(),
        config.uploads.legacy_photos_dir.clone(),
    );

    let diagnostics = service.scan_category(category.id, prefix).await?;

    let missing: Vec<_> = diagnostics.iter().filter(|d| d.is_missing()).collect();
    let legacy_only: Vec<_> = diagnostics
        .iter()
        .filter(|d| !d.literal_exists && d.legacy_exists)
        .collect();

    println!(
        "Path check for category '{}'{}: {} row(s) checked, {} resolvable only via legacy directory, {} missing.",
        category.slug,
        prefix.map(|p| format!(" (prefix '{}')", p)).unwrap_or_default(),
        diagnostics.len(),
        legacy_only.len(),
        missing.len()
    );

    for diag in &legacy_only {
        println!("  legacy  {}  ({})", diag.relative, diag.property_value);
    }
    for diag in &missing {
        println!(
            "  missing {}  (id={}, {})",
            diag.stored_path, diag.id, diag.property_value
        );
    }

    Ok(EXIT_OK)
}
