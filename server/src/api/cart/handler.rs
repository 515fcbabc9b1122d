//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{CartAdd, CartItem, CartSummary};
use crate::utils::{AppResponse, AppResult, ok, ok_with_message};

/// Get the caller's cart with estimated totals
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<CartSummary>>> {
    let summary = state.order_manager().get_cart(&user.id).await?;
    Ok(ok(summary))
}

/// Add an item, merging with an existing line for the same variant
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CartAdd>,
) -> AppResult<Json<AppResponse<CartItem>>> {
    let item = state.order_manager().add_to_cart(&user.id, payload).await?;
    Ok(ok(item))
}

/// Quantity update request
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Overwrite a cart line's quantity
pub async fn update_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<AppResponse<CartItem>>> {
    let item = state
        .order_manager()
        .update_cart_item(&user.id, &id, payload.quantity)
        .await?;
    Ok(ok(item))
}

/// Remove one cart line
pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.order_manager().remove_cart_item(&user.id, &id).await?;
    Ok(ok_with_message((), "Item removed"))
}

/// Empty the caller's cart
pub async fn clear(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<u64>>> {
    let removed = state.order_manager().clear_cart(&user.id).await?;
    Ok(ok_with_message(removed, "Cart cleared"))
}
