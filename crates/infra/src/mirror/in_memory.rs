use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use serde_json::Value;

use phonemart_core::{ProductId, ProductRecord};

use super::r#trait::{MirrorError, RemoteMirror};

/// In-memory mirror for tests/dev.
///
/// `set_offline(true)` makes every call fail with a connection error, which is
/// how tests exercise the local fallback.
#[derive(Debug, Default)]
pub struct InMemoryMirror {
    rows: RwLock<Vec<ProductRecord>>,
    offline: AtomicBool,
    bulk_inserts: AtomicUsize,
}

impl InMemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<ProductRecord>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of successful `insert_bulk` calls.
    pub fn bulk_inserts(&self) -> usize {
        self.bulk_inserts.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<ProductRecord> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn check(&self, operation: &'static str) -> Result<(), MirrorError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(MirrorError::Connection {
                operation,
                message: "mirror offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RemoteMirror for InMemoryMirror {
    async fn count(&self) -> Result<u64, MirrorError> {
        self.check("count")?;
        Ok(self.rows.read().unwrap_or_else(PoisonError::into_inner).len() as u64)
    }

    async fn select_all(&self) -> Result<Vec<ProductRecord>, MirrorError> {
        self.check("select_all")?;
        Ok(self.rows())
    }

    async fn select_by_id(&self, id: &ProductId) -> Result<Option<ProductRecord>, MirrorError> {
        self.check("select_by_id")?;
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows.iter().find(|r| r.has_id(id)).cloned())
    }

    async fn insert_bulk(&self, records: &[ProductRecord]) -> Result<(), MirrorError> {
        self.check("insert_bulk")?;
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(records);
        self.bulk_inserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update_stock(&self, id: &ProductId, stock: &Value) -> Result<bool, MirrorError> {
        self.check("update_stock")?;
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let mut matched = false;
        for row in rows.iter_mut().filter(|r| r.has_id(id)) {
            row.set_stock(stock.clone());
            matched = true;
        }
        Ok(matched)
    }
}
