//! Local product catalog: snapshot loading, cleaning and the in-memory store.

pub mod clean;
pub mod csv_source;
pub mod store;

pub use csv_source::{load_csv, read_csv, CatalogLoadError};
pub use store::{CatalogSnapshot, CatalogStore};
