use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde_json::Value;

use phonemart_core::{DomainError, DomainResult, ProductId, ProductRecord};

/// Loaded catalog: records in source order plus an id index.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    records: Vec<ProductRecord>,
    index: HashMap<ProductId, usize>,
    loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Build a snapshot, keeping the first record for each id.
    ///
    /// Records without an id are kept (they are listed but not addressable).
    pub fn build(records: Vec<ProductRecord>, loaded_at: DateTime<Utc>) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for record in records {
            match record.id() {
                Some(id) if index.contains_key(&id) => {
                    tracing::warn!(product_id = %id, "duplicate product id in catalog source; keeping first");
                }
                Some(id) => {
                    index.insert(id, kept.len());
                    kept.push(record);
                }
                None => kept.push(record),
            }
        }

        Self {
            records: kept,
            index,
            loaded_at,
        }
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    fn get(&self, id: &ProductId) -> Option<&ProductRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut ProductRecord> {
        self.index.get(id).map(|&i| &mut self.records[i])
    }
}

/// In-memory product catalog, populated once from the CSV snapshot.
///
/// Until [`CatalogStore::publish`] runs, every read returns
/// [`DomainError::NotLoaded`] so callers can answer with a retryable status
/// instead of an empty list.
#[derive(Debug, Default)]
pub struct CatalogStore {
    inner: RwLock<Option<CatalogSnapshot>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Store pre-loaded with `records` (tests/dev).
    pub fn loaded(records: Vec<ProductRecord>) -> Self {
        Self {
            inner: RwLock::new(Some(CatalogSnapshot::build(records, Utc::now()))),
        }
    }

    /// Publish the one-time snapshot. Returns the number of records kept.
    pub fn publish(&self, records: Vec<ProductRecord>) -> DomainResult<usize> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return Err(DomainError::invalid_input("catalog snapshot already published"));
        }

        let snapshot = CatalogSnapshot::build(records, Utc::now());
        let kept = snapshot.len();
        *guard = Some(snapshot);
        Ok(kept)
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Number of records (0 while not loaded).
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, CatalogSnapshot::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(CatalogSnapshot::loaded_at)
    }

    pub fn load_all(&self) -> DomainResult<Vec<ProductRecord>> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let snapshot = guard.as_ref().ok_or(DomainError::NotLoaded)?;
        Ok(snapshot.records().to_vec())
    }

    pub fn find_by_id(&self, id: &ProductId) -> DomainResult<ProductRecord> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let snapshot = guard.as_ref().ok_or(DomainError::NotLoaded)?;
        snapshot.get(id).cloned().ok_or(DomainError::NotFound)
    }

    pub fn update_stock(&self, id: &ProductId, stock: Value) -> DomainResult<()> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let snapshot = guard.as_mut().ok_or(DomainError::NotLoaded)?;
        let record = snapshot.get_mut(id).ok_or(DomainError::NotFound)?;
        record.set_stock(stock);
        Ok(())
    }
}
