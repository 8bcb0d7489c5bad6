//! Infrastructure layer: catalog snapshot, remote mirror, configuration.

pub mod catalog;
pub mod config;
pub mod mirror;

pub use catalog::{CatalogStore, CatalogSnapshot};
pub use config::Config;
pub use mirror::{InMemoryMirror, MirrorError, PostgresMirror, RemoteMirror};
