//! Cart API Module
//!
//! All routes require authentication; every operation is scoped to the
//! caller's own cart.

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::core::ServerState;

/// Cart router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart))
        .route("/", delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route("/items/{id}", patch(handler::update_item))
        .route("/items/{id}", delete(handler::remove_item))
}
