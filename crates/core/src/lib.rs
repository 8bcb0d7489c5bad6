//! `phonemart-core`: catalog foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the open-ended product record, its identifier, and the error taxonomy shared
//! by the store, the mirror and the HTTP layer.

pub mod error;
pub mod id;
pub mod record;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use record::ProductRecord;
pub use value_object::ValueObject;
