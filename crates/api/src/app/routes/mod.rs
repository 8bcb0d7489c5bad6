use axum::{routing::get, Router};

pub mod estimation;
pub mod products;
pub mod system;

/// Router for every public endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .nest("/produits", products::router())
        // Nesting only matches the bare prefix.
        .route("/produits/", get(products::list_products))
        .route("/api/products", get(products::list_local_products))
        .merge(estimation::router())
}
