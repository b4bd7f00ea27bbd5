use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::property_photos::property_value::identity_key;
use crate::modules::uploads::UploadStore;

/// Existence diagnostic for one stored photo path
#[derive(Debug)]
pub struct PathDiagnostic {
    pub id: Uuid,
    pub property_value: String,
    pub stored_path: String,
    /// Root-relative form of the stored path
    pub relative: String,
    /// File exists at the literal relative path
    pub literal_exists: bool,
    /// File exists after substituting the legacy directory segment
    pub legacy_exists: bool,
}

impl PathDiagnostic {
    pub fn is_missing(&self) -> bool {
        !self.literal_exists && !self.legacy_exists
    }
}

/// Read-only diagnostic that checks stored photo paths against the uploads
/// directory, probing both the literal path and the variant with the legacy
/// directory name replaced by the current one.
pub struct PathCheckService {
    pool: PgPool,
    store: UploadStore,
    photos_dir: String,
    legacy_photos_dir: String,
}

impl PathCheckService {
    pub fn new(
        pool: PgPool,
        store: UploadStore,
        photos_dir: String,
        legacy_photos_dir: String,
    ) -> Self {
        Self {
            pool,
            store,
            photos_dir,
            legacy_photos_dir,
        }
    }

    /// Check a single stored path
    pub fn check(&self, id: Uuid, property_value: &str, stored_path: &str) -> PathDiagnostic {
        let relative = self.store.strip_public_prefix(stored_path).to_string();
        let literal_exists = self.store.exists(&relative);

        let legacy_exists = if relative.contains(&self.legacy_photos_dir) {
            let substituted = relative.replace(&self.legacy_photos_dir, &self.photos_dir);
            self.store.exists(&substituted)
        } else {
            false
        };

        PathDiagnostic {
            id,
            property_value: property_value.to_string(),
            stored_path: stored_path.to_string(),
            relative,
            literal_exists,
            legacy_exists,
        }
    }

    /// Check every row of a category, optionally restricted to rows whose
    /// identity key starts with `prefix`. Returns all diagnostics in row
    /// order; the caller decides what to surface.
    pub async fn scan_category(
        &self,
        category_id: Uuid,
        prefix: Option<&str>,
    ) -> Result<Vec<PathDiagnostic>> {
        let rows = sqlx::query_as::<_, (Uuid, String, String)>(
            "SELECT id, property_value, photo_path FROM property_photos \
             WHERE category_id = $1 \
             ORDER BY property_value",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load photo paths: {:?}", e);
            AppError::Database(e)
        })?;

        let diagnostics = rows
            .iter()
            .filter(|(_, value, _)| match prefix {
                Some(prefix) => identity_key(value)
                    .map(|key| key.starts_with(prefix))
                    .unwrap_or(false),
                None => true,
            })
            .map(|(id, value, path)| self.check(*id, value, path))
            .collect();

        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UploadsConfig;
    use std::path::Path;

    fn service_at(root: &Path) -> PathCheckService {
        // The pool is never touched by `check`; connect_lazy defers I/O
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/never_connected")
            .unwrap();

        PathCheckService::new(
            pool,
            UploadStore::new(&UploadsConfig {
                root: root.to_path_buf(),
                public_prefix: "/uploads/".to_string(),
                photos_dir: "property-photos".to_string(),
                legacy_photos_dir: "PropertyPhotos".to_string(),
            }),
            "property-photos".to_string(),
            "PropertyPhotos".to_string(),
        )
    }

    #[tokio::test]
    async fn test_check_literal_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("property-photos")).unwrap();
        std::fs::write(dir.path().join("property-photos/a.png"), b"x").unwrap();

        let service = service_at(dir.path());
        let diag = service.check(
            Uuid::new_v4(),
            "DomeoDoors_Base_1|白",
            "/uploads/property-photos/a.png",
        );

        assert!(diag.literal_exists);
        assert!(!diag.legacy_exists);
        assert!(!diag.is_missing());
    }

    #[tokio::test]
    async fn test_check_legacy_substitution() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("property-photos")).unwrap();
        std::fs::write(dir.path().join("property-photos/a.png"), b"x").unwrap();

        let service = service_at(dir.path());
        // Stored under the legacy directory name; file lives under the current one
        let diag = service.check(
            Uuid::new_v4(),
            "DomeoDoors_Base_1|白",
            "/uploads/PropertyPhotos/a.png",
        );

        assert!(!diag.literal_exists);
        assert!(diag.legacy_exists);
        assert!(!diag.is_missing());
    }

    #[tokio::test]
    async fn test_check_missing_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("property-photos")).unwrap();

        let service = service_at(dir.path());
        let diag = service.check(
            Uuid::new_v4(),
            "H204",
            "/uploads/property-photos/gone.png",
        );

        assert!(diag.is_missing());
    }
}
