//! Admin Order API Module
//!
//! Staff order board. Listing and patching require a staff role; removal is
//! admin-only and is a soft delete that keeps the row for bookkeeping.

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::core::ServerState;

/// Admin order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", patch(handler::update))
        .route("/{id}", delete(handler::remove))
}
