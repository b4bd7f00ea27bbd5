use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;

use crate::core::config::ReportsConfig;

/// Resolve the artifact path: an explicit --out wins, otherwise a timestamped
/// file under the configured reports directory
pub fn resolve_out(
    config: &ReportsConfig,
    override_path: Option<PathBuf>,
    stem: &str,
    extension: &str,
) -> PathBuf {
    match override_path {
        Some(path) => path,
        None => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
            config
                .out_dir
                .join(format!("{}_{}.{}", stem, timestamp, extension))
        }
    }
}

/// Write a report artifact, creating parent directories
pub fn write_report(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write report {}", path.display()))?;

    tracing::info!("Report written: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_out_override_wins() {
        let config = ReportsConfig {
            out_dir: PathBuf::from("/var/reports"),
        };
        let path = resolve_out(&config, Some(PathBuf::from("/tmp/custom.csv")), "x", "csv");
        assert_eq!(path, PathBuf::from("/tmp/custom.csv"));
    }

    #[test]
    fn test_resolve_out_default_under_reports_dir() {
        let config = ReportsConfig {
            out_dir: PathBuf::from("/var/reports"),
        };
        let path = resolve_out(&config, None, "photo_dedup_doors_color", "csv");
        assert!(path.starts_with("/var/reports"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("photo_dedup_doors_color_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_write_report_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/audit.txt");

        write_report(&path, "b.png\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "b.png\n");
    }
}
