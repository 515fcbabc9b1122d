//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    DesignerOrderCreate, OrderCreate, OrderDetail, OrderFilters, OrderUpdate, Pagination,
};
use crate::orders::{OrderPage, OrderScope};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

fn scope_for(user: &CurrentUser) -> OrderScope {
    if user.role.can_manage_orders() {
        OrderScope::Admin
    } else {
        OrderScope::Customer(user.id.clone())
    }
}

/// Create an order from the request items
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let detail = state.order_manager().create_order(&user.id, payload).await?;
    Ok(ok_with_message(detail, "Order created"))
}

/// Create an addressless internal order (staff only)
pub async fn create_designer(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<DesignerOrderCreate>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    if !user.role.can_manage_orders() {
        return Err(AppError::forbidden("Designer orders require a staff role"));
    }
    let detail = state
        .order_manager()
        .create_order(&user.id, payload.into())
        .await?;
    Ok(ok_with_message(detail, "Order created"))
}

/// List the caller's orders (staff see all orders)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filters): Query<OrderFilters>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<AppResponse<OrderPage>>> {
    let pagination = pagination.clamped(state.config.max_page_size);
    let page = state
        .order_manager()
        .list_orders(&scope_for(&user), &filters, pagination)
        .await?;
    Ok(ok(page))
}

/// Get one order with its item snapshots
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let detail = state
        .order_manager()
        .get_order(&id, &scope_for(&user))
        .await?;
    Ok(ok(detail))
}

/// Patch an order. Customers may only update notes on their own orders.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let detail = state
        .order_manager()
        .update_order(&id, payload, &user)
        .await?;
    Ok(ok(detail))
}

/// Cancel a pending or confirmed order, restoring its stock
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let detail = state.order_manager().cancel_order(&id, &user).await?;
    Ok(ok_with_message(detail, "Order cancelled"))
}
