use std::collections::HashSet;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::services::ModelCodeService;
use crate::features::property_photos::models::PropertyPhoto;
use crate::features::property_photos::property_value::identity_key;

/// Keep/delete partition of property-photo rows for one reconciliation pass
#[derive(Debug, Default)]
pub struct DedupPartition {
    pub to_delete: Vec<Uuid>,
    pub to_keep: Vec<Uuid>,
    /// Rows kept because their identity key is empty (malformed value)
    pub skipped_empty_key: usize,
}

/// Result of a reconciliation pass
#[derive(Debug)]
pub enum DedupOutcome {
    Completed(DedupReport),
    /// The canonical code set was empty; nothing was touched
    Aborted,
}

/// Report of a completed reconciliation pass
#[derive(Debug)]
pub struct DedupReport {
    pub category_slug: String,
    pub property_name: String,
    pub canonical_codes: usize,
    pub scanned: usize,
    pub kept: usize,
    pub skipped_empty_key: usize,
    /// (id, property_value, photo_path) of every row marked for deletion
    pub delete_candidates: Vec<(Uuid, String, String)>,
    /// Rows actually removed; `None` in dry-run mode
    pub deleted: Option<u64>,
}

impl DedupReport {
    pub fn expected_deletions(&self) -> usize {
        self.delete_candidates.len()
    }
}

/// Partition rows against the canonical code set.
///
/// A row is marked for deletion iff its identity key is non-empty and absent
/// from the set. Rows with an empty identity key are kept and counted, never
/// deleted.
pub fn partition(rows: &[PropertyPhoto], canonical: &HashSet<String>) -> DedupPartition {
    let mut result = DedupPartition::default();

    for row in rows {
        match identity_key(&row.property_value) {
            Some(key) if !canonical.contains(key) => result.to_delete.push(row.id),
            Some(_) => result.to_keep.push(row.id),
            None => {
                result.skipped_empty_key += 1;
                result.to_keep.push(row.id);
            }
        }
    }

    result
}

/// Reconciles property-photo rows against the canonical model-code set of
/// their category, removing associations left behind by imports that used
/// human-readable model names instead of model codes.
pub struct PhotoDedupService {
    pool: PgPool,
    model_codes: Arc<ModelCodeService>,
}

impl PhotoDedupService {
    pub fn new(pool: PgPool, model_codes: Arc<ModelCodeService>) -> Self {
        Self { pool, model_codes }
    }

    /// Run one reconciliation pass over a category/property axis.
    ///
    /// With `apply = false` the partition is only reported. With
    /// `apply = true` the `to_delete` set is removed in one bulk operation.
    pub async fn reconcile(
        &self,
        category_id: Uuid,
        category_slug: &str,
        property_name: &str,
        apply: bool,
    ) -> Result<DedupOutcome> {
        let canonical = self.model_codes.canonical_codes(category_id).await?;

        // Safety invariant: an empty ground truth would mark every row for
        // deletion, so the pass aborts before reading the photo rows at all.
        if canonical.is_empty() {
            tracing::warn!(
                "No canonical model codes found for category '{}'; aborting without deletions",
                category_slug
            );
            return Ok(DedupOutcome::Aborted);
        }

        let rows = self.load_rows(category_id, property_name).await?;
        let partitioned = partition(&rows, &canonical);

        if partitioned.skipped_empty_key > 0 {
            tracing::info!(
                "Skipped {} row(s) with empty identity key",
                partitioned.skipped_empty_key
            );
        }

        let delete_ids: HashSet<Uuid> = partitioned.to_delete.iter().copied().collect();
        let delete_candidates: Vec<(Uuid, String, String)> = rows
            .iter()
            .filter(|r| delete_ids.contains(&r.id))
            .map(|r| (r.id, r.property_value.clone(), r.photo_path.clone()))
            .collect();

        let deleted = if apply && !partitioned.to_delete.is_empty() {
            Some(self.delete_rows(&partitioned.to_delete).await?)
        } else if apply {
            Some(0)
        } else {
            None
        };

        if let Some(count) = deleted {
            if count != partitioned.to_delete.len() as u64 {
                tracing::warn!(
                    "Deleted {} row(s) but {} were marked; rows changed concurrently",
                    count,
                    partitioned.to_delete.len()
                );
            }
        }

        Ok(DedupOutcome::Completed(DedupReport {
            category_slug: category_slug.to_string(),
            property_name: property_name.to_string(),
            canonical_codes: canonical.len(),
            scanned: rows.len(),
            kept: partitioned.to_keep.len(),
            skipped_empty_key: partitioned.skipped_empty_key,
            delete_candidates,
            deleted,
        }))
    }

    async fn load_rows(&self, category_id: Uuid, property_name: &str) -> Result<Vec<PropertyPhoto>> {
        let rows = sqlx::query_as::<_, PropertyPhoto>(
            "SELECT id, category_id, property_name, property_value, photo_path, photo_type, \
                    original_filename, file_size, mime_type, created_at, updated_at \
             FROM property_photos \
             WHERE category_id = $1 AND property_name = $2 \
             ORDER BY property_value",
        )
        .bind(category_id)
        .bind(property_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load property photos: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows)
    }

    async fn delete_rows(&self, ids: &[Uuid]) -> Result<u64> {
        let result = sqlx::query("DELETE FROM property_photos WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete property photos: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn photo_row(value: &str) -> PropertyPhoto {
        PropertyPhoto {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            property_name: "color".to_string(),
            property_value: value.to_string(),
            photo_path: format!("/uploads/property-photos/{}.png", Uuid::new_v4()),
            photo_type: "cover".to_string(),
            original_filename: None,
            file_size: None,
            mime_type: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn canonical(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partition_keeps_known_codes_deletes_unknown() {
        let rows = vec![
            photo_row("DomeoDoors_Base_1|Эмаль|Белый"),
            photo_row("Дверь Гладкое ДГ|Эмаль|Белый"),
        ];
        let set = canonical(&["DomeoDoors_Base_1"]);

        let p = partition(&rows, &set);

        assert_eq!(p.to_keep, vec![rows[0].id]);
        assert_eq!(p.to_delete, vec![rows[1].id]);
        assert_eq!(p.skipped_empty_key, 0);
    }

    #[test]
    fn test_partition_keeps_empty_identity_keys() {
        let rows = vec![
            photo_row("|Эмаль|Белый"),
            photo_row(""),
            photo_row("   |Белый"),
        ];
        let set = canonical(&["DomeoDoors_Base_1"]);

        let p = partition(&rows, &set);

        assert!(p.to_delete.is_empty());
        assert_eq!(p.to_keep.len(), 3);
        assert_eq!(p.skipped_empty_key, 3);
    }

    #[test]
    fn test_partition_exact_match_only() {
        // Prefixes, case variants and renames of a canonical code do not match
        let rows = vec![
            photo_row("DomeoDoors_Base|Эмаль"),
            photo_row("domeodoors_base_1|Эмаль"),
        ];
        let set = canonical(&["DomeoDoors_Base_1"]);

        let p = partition(&rows, &set);

        assert_eq!(p.to_delete.len(), 2);
        assert!(p.to_keep.is_empty());
    }

    #[test]
    fn test_partition_value_without_delimiter() {
        let rows = vec![photo_row("DomeoDoors_Base_1"), photo_row("H204")];
        let set = canonical(&["DomeoDoors_Base_1"]);

        let p = partition(&rows, &set);

        assert_eq!(p.to_keep, vec![rows[0].id]);
        assert_eq!(p.to_delete, vec![rows[1].id]);
    }
}
