use std::collections::HashSet;
use std::path::PathBuf;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::modules::uploads::UploadStore;

/// Result of one orphan-file audit
#[derive(Debug)]
pub struct OrphanReport {
    /// Files on disk, total
    pub scanned_files: usize,
    /// Distinct basenames referenced by property-photo rows
    pub referenced: usize,
    /// Basenames on disk with no referencing row, sorted
    pub unlinked: Vec<String>,
}

/// One-way audit of the uploads photo directory against property-photo rows.
///
/// Never deletes anything; it only reports files whose basename no row
/// references, so an operator can decide what to do with them.
pub struct OrphanAuditService {
    pool: PgPool,
    store: UploadStore,
    photos_dir: String,
}

impl OrphanAuditService {
    pub fn new(pool: PgPool, store: UploadStore, photos_dir: String) -> Self {
        Self {
            pool,
            store,
            photos_dir,
        }
    }

    pub async fn audit(&self) -> Result<OrphanReport> {
        let paths = sqlx::query_scalar::<_, String>("SELECT photo_path FROM property_photos")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load photo paths: {:?}", e);
                AppError::Database(e)
            })?;

        let referenced = referenced_basenames(&paths, &self.photos_dir);
        let files = self.store.scan_files(&self.photos_dir)?;
        let unlinked = unlinked_files(&files, &referenced);

        tracing::info!(
            "Orphan audit: {} file(s) on disk, {} referenced basename(s), {} unlinked",
            files.len(),
            referenced.len(),
            unlinked.len()
        );

        Ok(OrphanReport {
            scanned_files: files.len(),
            referenced: referenced.len(),
            unlinked,
        })
    }
}

/// Lowercased basenames of every stored path containing the directory marker
/// (case-insensitively). Paths from other upload areas are ignored.
pub fn referenced_basenames(paths: &[String], marker: &str) -> HashSet<String> {
    let marker = marker.to_lowercase();

    paths
        .iter()
        .filter(|p| p.to_lowercase().contains(&marker))
        .filter_map(|p| p.rsplit('/').next())
        .filter(|basename| !basename.is_empty())
        .map(|basename| basename.to_lowercase())
        .collect()
}

/// Sorted basenames of files whose lowercased basename is not referenced
pub fn unlinked_files(files: &[PathBuf], referenced: &HashSet<String>) -> Vec<String> {
    let mut unlinked: Vec<String> = files
        .iter()
        .filter_map(|f| f.file_name().and_then(|n| n.to_str()))
        .filter(|name| !referenced.contains(&name.to_lowercase()))
        .map(|name| name.to_string())
        .collect();

    unlinked.sort();
    unlinked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_basenames_marker_filter() {
        let paths = vec![
            "/uploads/property-photos/a.png".to_string(),
            "/uploads/PROPERTY-PHOTOS/sub/B.PNG".to_string(),
            "/uploads/avatars/c.png".to_string(),
        ];

        let referenced = referenced_basenames(&paths, "property-photos");

        assert_eq!(referenced.len(), 2);
        assert!(referenced.contains("a.png"));
        assert!(referenced.contains("b.png"));
        assert!(!referenced.contains("c.png"));
    }

    #[test]
    fn test_unlinked_files() {
        let files = vec![
            PathBuf::from("/srv/uploads/property-photos/a.png"),
            PathBuf::from("/srv/uploads/property-photos/b.png"),
        ];
        let referenced: HashSet<String> = ["a.png".to_string()].into_iter().collect();

        assert_eq!(unlinked_files(&files, &referenced), vec!["b.png"]);
    }

    #[test]
    fn test_unlinked_files_case_insensitive() {
        let files = vec![PathBuf::from("/srv/uploads/property-photos/Photo.PNG")];
        let referenced: HashSet<String> = ["photo.png".to_string()].into_iter().collect();

        assert!(unlinked_files(&files, &referenced).is_empty());
    }
}
