use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Domeo catalog backend and administrative maintenance tools
#[derive(Debug, Parser)]
#[command(name = "domeo-core", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default when no subcommand is given)
    Serve,

    /// Remove property-photo rows whose identity key matches no known model code
    ///
    /// Dry-run by default: reports the keep/delete partition without touching
    /// the store. Pass --apply to commit the deletion.
    PhotoDedup {
        /// Category slug to reconcile
        category: String,

        /// Property axis to reconcile (e.g. "color")
        property: String,

        /// Report only, never delete (the default)
        #[arg(long)]
        dry_run: bool,

        /// Commit the deletion
        #[arg(long, visible_alias = "yes", conflicts_with = "dry_run")]
        apply: bool,

        /// Override the report artifact path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List image files on disk with no referencing property-photo row
    PhotoOrphans {
        /// Override the report artifact path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check stored photo paths against the uploads directory (read-only)
    PhotoPaths {
        /// Category slug to check
        category: String,

        /// Only check rows whose identity key starts with this prefix
        prefix: Option<String>,
    },

    /// Write the CSV export artifact for a document
    ExportDocument {
        /// Document id
        id: Uuid,

        /// Override the artifact path
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
