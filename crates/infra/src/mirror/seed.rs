//! One-time seeding of an empty mirror from the local catalog.

use phonemart_core::DomainError;

use super::r#trait::{MirrorError, RemoteMirror};
use crate::catalog::CatalogStore;

/// What [`seed_once`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Rows were copied from the catalog.
    Seeded { rows: usize },
    /// The mirror already held rows; nothing was written.
    AlreadyPopulated { rows: u64 },
    /// The local catalog had nothing to copy.
    CatalogEmpty,
    /// The local catalog has not been loaded; seeding must run after the load.
    CatalogNotLoaded,
    /// A mirror call failed; the mirror was left as is.
    Failed(MirrorError),
}

/// Copy the catalog into the mirror if, and only if, the mirror is empty.
///
/// Never returns an error: every failure is logged and reported in the outcome.
pub async fn seed_once<M>(catalog: &CatalogStore, mirror: &M) -> SeedOutcome
where
    M: RemoteMirror + ?Sized,
{
    let existing = match mirror.count().await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(error = %e, "mirror count failed; seeding skipped");
            return SeedOutcome::Failed(e);
        }
    };
    if existing > 0 {
        tracing::info!(rows = existing, "mirror already populated; seeding skipped");
        return SeedOutcome::AlreadyPopulated { rows: existing };
    }

    let records = match catalog.load_all() {
        Ok(records) => records,
        Err(DomainError::NotLoaded) => {
            tracing::warn!("catalog not loaded; seeding skipped");
            return SeedOutcome::CatalogNotLoaded;
        }
        Err(e) => {
            tracing::warn!(error = %e, "catalog unreadable; seeding skipped");
            return SeedOutcome::CatalogNotLoaded;
        }
    };
    if records.is_empty() {
        tracing::warn!("no products in memory to seed");
        return SeedOutcome::CatalogEmpty;
    }

    match mirror.insert_bulk(&records).await {
        Ok(()) => {
            tracing::info!(rows = records.len(), "catalog copied into mirror");
            SeedOutcome::Seeded { rows: records.len() }
        }
        Err(e) => {
            tracing::error!(error = %e, "mirror bulk insert failed");
            SeedOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::InMemoryMirror;
    use phonemart_core::ProductRecord;
    use serde_json::json;

    fn catalog() -> CatalogStore {
        CatalogStore::loaded(vec![
            ProductRecord::from_value(json!({ "id": "1", "stock": "3" })).unwrap(),
            ProductRecord::from_value(json!({ "id": "2", "stock": "0" })).unwrap(),
        ])
    }

    #[tokio::test]
    async fn seeds_empty_mirror_once() {
        let catalog = catalog();
        let mirror = InMemoryMirror::new();

        assert_eq!(seed_once(&catalog, &mirror).await, SeedOutcome::Seeded { rows: 2 });
        assert_eq!(
            seed_once(&catalog, &mirror).await,
            SeedOutcome::AlreadyPopulated { rows: 2 }
        );
        assert_eq!(mirror.bulk_inserts(), 1);
        assert_eq!(mirror.rows().len(), 2);
    }

    #[tokio::test]
    async fn populated_mirror_is_left_alone() {
        let mirror = InMemoryMirror::with_rows(vec![
            ProductRecord::from_value(json!({ "id": "9" })).unwrap(),
        ]);

        assert_eq!(
            seed_once(&catalog(), &mirror).await,
            SeedOutcome::AlreadyPopulated { rows: 1 }
        );
        assert_eq!(mirror.bulk_inserts(), 0);
    }

    #[tokio::test]
    async fn unloaded_or_empty_catalog_is_not_seeded() {
        let mirror = InMemoryMirror::new();

        assert_eq!(
            seed_once(&CatalogStore::new(), &mirror).await,
            SeedOutcome::CatalogNotLoaded
        );
        assert_eq!(
            seed_once(&CatalogStore::loaded(vec![]), &mirror).await,
            SeedOutcome::CatalogEmpty
        );
        assert_eq!(mirror.bulk_inserts(), 0);
    }

    #[tokio::test]
    async fn unreachable_mirror_reports_failure() {
        let mirror = InMemoryMirror::new();
        mirror.set_offline(true);

        assert!(matches!(seed_once(&catalog(), &mirror).await, SeedOutcome::Failed(_)));
    }
}
