//! Admin Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{OrderDetail, OrderFilters, OrderUpdate, Pagination};
use crate::orders::{OrderPage, OrderScope};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

fn require_staff(user: &CurrentUser) -> AppResult<()> {
    if user.role.can_manage_orders() {
        Ok(())
    } else {
        Err(AppError::forbidden("Staff role required"))
    }
}

/// List all orders with filters. Cancelled orders are hidden unless the
/// status filter asks for them.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filters): Query<OrderFilters>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<AppResponse<OrderPage>>> {
    require_staff(&user)?;
    let pagination = pagination.clamped(state.config.max_page_size);
    let page = state
        .order_manager()
        .list_orders(&OrderScope::Admin, &filters, pagination)
        .await?;
    Ok(ok(page))
}

/// Patch any order's fields
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    require_staff(&user)?;
    let detail = state
        .order_manager()
        .update_order(&id, payload, &user)
        .await?;
    Ok(ok(detail))
}

/// Soft-delete an order (admin only). Does not restore stock.
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    if user.role != Role::Admin {
        return Err(AppError::forbidden("Administrator role required"));
    }
    state.order_manager().delete_order(&id).await?;
    Ok(ok_with_message((), "Order removed"))
}
