//! Product Repository
//!
//! Catalog reads plus the two stock mutation primitives. Stock is only ever
//! changed through the conditional update here, inside an order transaction.

use super::RepoResult;
use crate::db::models::Product;
use sqlx::{SqliteConnection, SqlitePool};

const PRODUCT_COLUMNS: &str = "id, name, slug, description, price_cents, stock_quantity, \
     images, is_active, created_at, updated_at";

/// Find an active product by id
pub async fn find_active_by_id(
    conn: &mut SqliteConnection,
    id: &str,
) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ? AND is_active = 1",
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// List active products, newest first
pub async fn list_active(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = 1 \
         ORDER BY created_at DESC LIMIT ? OFFSET ?",
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Find a product by id regardless of active flag
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?",
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Conditionally decrement stock. Returns false when the product no longer
/// has `quantity` units available, so concurrent orders cannot oversell.
pub async fn decrement_stock(
    conn: &mut SqliteConnection,
    product_id: &str,
    quantity: i64,
) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE products SET stock_quantity = stock_quantity - ? \
         WHERE id = ? AND stock_quantity >= ?",
    )
    .bind(quantity)
    .bind(product_id)
    .bind(quantity)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Restore stock released by a cancelled order
pub async fn restore_stock(
    conn: &mut SqliteConnection,
    product_id: &str,
    quantity: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE products SET stock_quantity = stock_quantity + ? WHERE id = ?")
        .bind(quantity)
        .bind(product_id)
        .execute(conn)
        .await?;
    Ok(())
}
