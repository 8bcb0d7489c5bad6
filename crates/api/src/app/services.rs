use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;

use phonemart_core::{DomainError, DomainResult, ProductId, ProductRecord};
use phonemart_infra::catalog::{load_csv, CatalogStore};
use phonemart_infra::mirror::{seed_once, MirrorError, PostgresMirror, RemoteMirror};
use phonemart_infra::Config;

use super::dto::HealthResponse;

/// Shared state behind every handler.
///
/// Reads prefer the remote mirror when one is configured and fall back to
/// the local catalog on any mirror failure. Writes go to the mirror when
/// configured and never fall back.
///
/// The listing waits for the local snapshot whatever the mirror says. Single
/// product reads and stock updates only need it when the local copy answers.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogStore>,
    mirror: Option<Arc<dyn RemoteMirror>>,
}

impl AppServices {
    pub fn new(catalog: Arc<CatalogStore>, mirror: Option<Arc<dyn RemoteMirror>>) -> Self {
        Self { catalog, mirror }
    }

    pub fn local_only(catalog: Arc<CatalogStore>) -> Self {
        Self::new(catalog, None)
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    pub fn mirror_configured(&self) -> bool {
        self.mirror.is_some()
    }

    pub async fn list_products(&self) -> DomainResult<Vec<ProductRecord>> {
        // Nothing is served until the snapshot exists, mirror or not.
        if !self.catalog.is_loaded() {
            return Err(DomainError::NotLoaded);
        }

        if let Some(mirror) = &self.mirror {
            match mirror.select_all().await {
                Ok(rows) => return Ok(rows),
                Err(e) => tracing::warn!(error = %e, "mirror read failed; serving local catalog"),
            }
        }
        self.catalog.load_all()
    }

    /// Local snapshot only, whatever the mirror configuration.
    pub fn list_local(&self) -> DomainResult<Vec<ProductRecord>> {
        self.catalog.load_all()
    }

    pub async fn get_product(&self, id: &ProductId) -> DomainResult<ProductRecord> {
        if let Some(mirror) = &self.mirror {
            match mirror.select_by_id(id).await {
                Ok(Some(record)) => return Ok(record),
                Ok(None) => return Err(DomainError::NotFound),
                Err(e) => tracing::warn!(error = %e, product_id = %id, "mirror read failed; serving local catalog"),
            }
        }
        self.catalog.find_by_id(id)
    }

    pub async fn update_stock(&self, id: &ProductId, stock: Value) -> DomainResult<()> {
        let Some(mirror) = &self.mirror else {
            return self.catalog.update_stock(id, stock);
        };

        if !mirror.update_stock(id, &stock).await? {
            return Err(DomainError::NotFound);
        }

        // Keep local reads consistent with the mirror; the mirror is authoritative.
        if let Err(e) = self.catalog.update_stock(id, stock) {
            tracing::warn!(error = %e, product_id = %id, "mirror updated but local copy was not");
        }
        Ok(())
    }

    pub fn health(&self) -> HealthResponse {
        let catalog_loaded = self.catalog.is_loaded();
        HealthResponse {
            status: if catalog_loaded { "ok" } else { "loading" },
            catalog_loaded,
            mirror_configured: self.mirror_configured(),
            products: self.catalog.len(),
            loaded_at: self.catalog.loaded_at(),
        }
    }
}

/// Wire services from configuration. The mirror pool connects lazily, so an
/// unreachable database surfaces on first use rather than here.
pub fn build_services(config: &Config) -> Result<AppServices, MirrorError> {
    let catalog = Arc::new(CatalogStore::new());

    let mirror = match &config.mirror {
        Some(mirror_config) => {
            let mirror = PostgresMirror::connect_lazy(mirror_config)?;
            tracing::info!(table = %mirror.table(), "remote mirror configured");
            Some(Arc::new(mirror) as Arc<dyn RemoteMirror>)
        }
        None => None,
    };

    Ok(AppServices::new(catalog, mirror))
}

/// Load the CSV snapshot in the background, then seed the mirror if it is empty.
///
/// A failed load is logged and leaves the catalog unloaded, so reads keep
/// answering `not_loaded`.
pub fn spawn_catalog_load(services: Arc<AppServices>, path: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        let records = match load_csv(&path).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "catalog load failed");
                return;
            }
        };

        match services.catalog.publish(records) {
            Ok(kept) => tracing::info!(products = kept, path = %path.display(), "catalog loaded"),
            Err(e) => {
                tracing::error!(error = %e, "catalog publish failed");
                return;
            }
        }

        if let Some(mirror) = &services.mirror {
            let outcome = seed_once(&services.catalog, mirror.as_ref()).await;
            tracing::debug!(?outcome, "mirror seeding finished");
        }
    })
}
