use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Config;
use crate::features::exports::services::csv_escape;
use crate::features::products::services::ModelCodeService;
use crate::features::property_photos::services::{DedupOutcome, DedupReport, PhotoDedupService};
use crate::maintenance::{report, require_category, EXIT_EARLY_TERMINATION, EXIT_OK};

/// Reconcile property-photo rows of one category/property axis against the
/// canonical model codes. Dry-run unless `apply` is set.
pub async fn run(
    pool: &PgPool,
    config: &Config,
    category_slug: &str,
    property_name: &str,
    apply: bool,
    out: Option<PathBuf>,
) -> anyhow::Result<i32> {
    let category = require_category(pool, category_slug).await?;

    let service = PhotoDedupService::new(
        pool.clone(),
        Arc::new(ModelCodeService::new(pool.clone())),
    );

    let outcome = service
        .reconcile(category.id, &category.slug, property_name, apply)
        .await?;

    let dedup = match outcome {
        DedupOutcome::Aborted => {
            println!(
                "No canonical model codes exist for category '{}'; aborting with zero deletions.",
                category_slug
            );
            println!("Populate product model codes first, then re-run.");
            return Ok(EXIT_EARLY_TERMINATION);
        }
        DedupOutcome::Completed(report) => report,
    };

    let out_path = report::resolve_out(
        &config.reports,
        out,
        &format!("photo_dedup_{}_{}", category.slug, property_name),
        "csv",
    );
    report::write_report(&out_path, &render_csv(&dedup))?;

    print_summary(&dedup, apply);
    println!("Report: {}", out_path.display());

    Ok(EXIT_OK)
}

fn render_csv(dedup: &DedupReport) -> String {
    let mut out = String::from("id,property_value,photo_path\n");
    for (id, value, path) in &dedup.delete_candidates {
        out.push_str(&format!(
            "{},{},{}\n",
            id,
            csv_escape(value),
            csv_escape(path)
        ));
    }
    out
}

fn print_summary(dedup: &DedupReport, apply: bool) {
    let mode = if apply { "apply" } else { "dry-run" };
    println!(
        "Dedup ({}) category '{}' property '{}':",
        mode, dedup.category_slug, dedup.property_name
    );
    println!("  canonical codes : {}", dedup.canonical_codes);
    println!("  rows scanned    : {}", dedup.scanned);
    println!("  rows kept       : {}", dedup.kept);
    println!("  empty keys kept : {}", dedup.skipped_empty_key);
    println!("  marked delete   : {}", dedup.expected_deletions());
    match dedup.deleted {
        Some(count) => println!("  rows deleted    : {}", count),
        None => println!("  rows deleted    : 0 (dry-run)"),
    }
}
