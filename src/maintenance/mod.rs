//! Administrative batch jobs invoked from the command line.
//!
//! Every job is a single pass: load, compute, report, optionally persist.
//! On error the whole pass aborts and nothing is committed; bulk store
//! operations rely on the storage layer's atomicity.

mod export_document;
mod orphan_audit;
mod path_check;
mod photo_dedup;
mod report;

use anyhow::Context;

use crate::cli::Command;
use crate::core::config::Config;
use crate::core::database;
use crate::features::categories::models::Category;
use crate::features::categories::services::CategoryService;

/// Successful completion
pub const EXIT_OK: i32 = 0;

/// The job terminated early without doing its work (not an error); used by
/// the dedup safety abort on an empty canonical code set
pub const EXIT_EARLY_TERMINATION: i32 = 2;

pub async fn run(command: Command, config: &Config) -> anyhow::Result<i32> {
    let pool = database::create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;

    match command {
        Command::Serve => unreachable!("serve is dispatched by main"),
        Command::PhotoDedup {
            category,
            property,
            dry_run,
            apply,
            out,
        } => {
            let apply = apply && !dry_run;
            photo_dedup::run(&pool, config, &category, &property, apply, out).await
        }
        Command::PhotoOrphans { out } => orphan_audit::run(&pool, config, out).await,
        Command::PhotoPaths { category, prefix } => {
            path_check::run(&pool, config, &category, prefix.as_deref()).await
        }
        Command::ExportDocument { id, out } => export_document::run(&pool, config, id, out).await,
    }
}

/// Resolve a category slug or fail the whole job (precondition error)
async fn require_category(pool: &sqlx::PgPool, slug: &str) -> anyhow::Result<Category> {
    let service = CategoryService::new(pool.clone());
    service
        .find_by_slug(slug)
        .await?
        .with_context(|| format!("category '{}' not found", slug))
}
