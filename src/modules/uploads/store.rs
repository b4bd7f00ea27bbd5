use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::core::config::UploadsConfig;

/// Filesystem-backed store for uploaded files
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    public_prefix: String,
}

impl UploadStore {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            root: config.root.clone(),
            public_prefix: config.public_prefix.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL under which a relative path is served
    pub fn public_url(&self, relative: &str) -> String {
        format!(
            "{}{}",
            self.public_prefix,
            relative.trim_start_matches('/')
        )
    }

    /// Strip the public URL prefix from a stored path, yielding the
    /// root-relative form. Paths that do not carry the prefix (absolute URLs
    /// from old imports, bare relative paths) are returned trimmed of any
    /// leading slash.
    pub fn strip_public_prefix<'a>(&self, stored: &'a str) -> &'a str {
        let path = match stored.find("//") {
            // "https://host/uploads/..." -> take everything after the host
            Some(idx) => {
                let after_scheme = &stored[idx + 2..];
                match after_scheme.find('/') {
                    Some(slash) => &after_scheme[slash..],
                    None => after_scheme,
                }
            }
            None => stored,
        };

        path.strip_prefix(self.public_prefix.as_str())
            .unwrap_or_else(|| path.trim_start_matches('/'))
    }

    /// Absolute on-disk location of a root-relative path
    pub fn absolute(&self, relative: &str) -> PathBuf {
        self.root.join(relative.trim_start_matches('/'))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.absolute(relative).is_file()
    }

    /// Persist bytes under a root-relative path, creating parent directories
    pub async fn save(&self, relative: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let target = self.absolute(relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        debug!("File saved: {}", target.display());
        Ok(target)
    }

    /// Remove a file; missing files are not an error
    pub async fn remove(&self, relative: &str) -> std::io::Result<()> {
        let target = self.absolute(relative);
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                debug!("File removed: {}", target.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// All regular files under a subdirectory of the root.
    ///
    /// Directory sizes are bounded (thousands of files), so the walk is
    /// collected eagerly.
    pub fn scan_files(&self, subdir: &str) -> std::io::Result<Vec<PathBuf>> {
        let dir = self.root.join(subdir);
        if !dir.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("uploads directory not found: {}", dir.display()),
            ));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir) {
            let entry = entry.map_err(std::io::Error::other)?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UploadsConfig;

    fn store_at(root: &Path) -> UploadStore {
        UploadStore::new(&UploadsConfig {
            root: root.to_path_buf(),
            public_prefix: "/uploads/".to_string(),
            photos_dir: "property-photos".to_string(),
            legacy_photos_dir: "PropertyPhotos".to_string(),
        })
    }

    #[test]
    fn test_public_url_round_trip() {
        let store = store_at(Path::new("/tmp/uploads"));
        let url = store.public_url("property-photos/doors/a.png");
        assert_eq!(url, "/uploads/property-photos/doors/a.png");
        assert_eq!(
            store.strip_public_prefix(&url),
            "property-photos/doors/a.png"
        );
    }

    #[test]
    fn test_strip_public_prefix_absolute_url() {
        let store = store_at(Path::new("/tmp/uploads"));
        assert_eq!(
            store.strip_public_prefix("https://cdn.example.com/uploads/property-photos/a.png"),
            "property-photos/a.png"
        );
    }

    #[test]
    fn test_strip_public_prefix_foreign_path() {
        let store = store_at(Path::new("/tmp/uploads"));
        // Paths without the known prefix are only trimmed of the leading slash
        assert_eq!(store.strip_public_prefix("/media/x.png"), "media/x.png");
    }

    #[tokio::test]
    async fn test_save_scan_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        store
            .save("property-photos/doors/a.png", b"png-bytes")
            .await
            .unwrap();
        assert!(store.exists("property-photos/doors/a.png"));

        let files = store.scan_files("property-photos").unwrap();
        assert_eq!(files.len(), 1);

        store.remove("property-photos/doors/a.png").await.unwrap();
        assert!(!store.exists("property-photos/doors/a.png"));
        // Removing again is not an error
        store.remove("property-photos/doors/a.png").await.unwrap();
    }

    #[test]
    fn test_scan_files_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());
        assert!(store.scan_files("nope").is_err());
    }
}
