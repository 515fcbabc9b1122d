//! Product API Module
//!
//! Public catalog reads. Catalog administration is out of scope for this
//! service; products are seeded and maintained elsewhere.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Product router - public routes (no authentication)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}
