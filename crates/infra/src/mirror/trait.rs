use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use phonemart_core::{DomainError, ProductId, ProductRecord};

/// Remote mirror operation error.
///
/// These are **infrastructure errors**. Read paths recover from every variant
/// by falling back to the local catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MirrorError {
    #[error("{operation} timed out after {after_ms} ms")]
    Timeout { operation: &'static str, after_ms: u64 },

    #[error("connection error in {operation}: {message}")]
    Connection { operation: &'static str, message: String },

    #[error("database error in {operation}: {message}")]
    Database { operation: &'static str, message: String },

    #[error("unexpected row shape in {operation}: {message}")]
    Decode { operation: &'static str, message: String },
}

impl From<MirrorError> for DomainError {
    fn from(err: MirrorError) -> Self {
        DomainError::upstream(err.to_string())
    }
}

/// Hosted relational copy of the catalog.
///
/// Every call is fallible; callers decide whether to fall back or surface.
#[async_trait::async_trait]
pub trait RemoteMirror: Send + Sync {
    /// Number of rows in the products table.
    async fn count(&self) -> Result<u64, MirrorError>;

    async fn select_all(&self) -> Result<Vec<ProductRecord>, MirrorError>;

    /// `Ok(None)` when the mirror answered but holds no such row.
    async fn select_by_id(&self, id: &ProductId) -> Result<Option<ProductRecord>, MirrorError>;

    async fn insert_bulk(&self, records: &[ProductRecord]) -> Result<(), MirrorError>;

    /// Returns whether a row matched `id`.
    async fn update_stock(&self, id: &ProductId, stock: &Value) -> Result<bool, MirrorError>;
}

#[async_trait::async_trait]
impl<M> RemoteMirror for Arc<M>
where
    M: RemoteMirror + ?Sized,
{
    async fn count(&self) -> Result<u64, MirrorError> {
        (**self).count().await
    }

    async fn select_all(&self) -> Result<Vec<ProductRecord>, MirrorError> {
        (**self).select_all().await
    }

    async fn select_by_id(&self, id: &ProductId) -> Result<Option<ProductRecord>, MirrorError> {
        (**self).select_by_id(id).await
    }

    async fn insert_bulk(&self, records: &[ProductRecord]) -> Result<(), MirrorError> {
        (**self).insert_bulk(records).await
    }

    async fn update_stock(&self, id: &ProductId, stock: &Value) -> Result<bool, MirrorError> {
        (**self).update_stock(id, stock).await
    }
}
