//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::models::{Pagination, Product};
use crate::db::repository::product;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// List active products
pub async fn list(
    State(state): State<ServerState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let pagination = pagination.clamped(state.config.max_page_size);
    let products = product::list_active(&state.pool, pagination.limit, pagination.offset())
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(ok(products))
}

/// Get one active product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = product::find_by_id(&state.pool, &id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;
    Ok(ok(product))
}
