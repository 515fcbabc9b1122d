//! Order API Module
//!
//! Customer-facing checkout and order access. Customers only ever see their
//! own orders; staff roles get unscoped reads. The designer route creates
//! addressless internal orders for fittings and samples.

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/", get(handler::list))
        .route("/designer", post(handler::create_designer))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}", patch(handler::update))
        .route("/{id}/cancel", post(handler::cancel))
}
