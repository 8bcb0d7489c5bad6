//! Remote mirror: optional hosted copy of the catalog.

pub mod in_memory;
pub mod postgres;
pub mod seed;
pub mod r#trait;

pub use in_memory::InMemoryMirror;
pub use postgres::PostgresMirror;
pub use r#trait::{MirrorError, RemoteMirror};
pub use seed::{seed_once, SeedOutcome};
