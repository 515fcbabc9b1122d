//! Cart Repository

use super::RepoResult;
use crate::db::models::{CartItem, CartItemDetail};
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

/// List a user's cart joined with live product data, oldest line first
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> RepoResult<Vec<CartItemDetail>> {
    let rows = sqlx::query_as::<_, CartItemDetail>(
        "SELECT c.id, c.product_id, p.name AS product_name, p.slug AS product_slug, \
         json_extract(p.images, '$[0]') AS product_image, \
         p.price_cents, p.stock_quantity, \
         c.quantity, c.size, c.color, c.customizations, c.created_at \
         FROM cart_items c \
         JOIN products p ON p.id = c.product_id \
         WHERE c.user_id = ? \
         ORDER BY c.created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Find the cart line matching the full uniqueness key
pub async fn find_entry(
    conn: &mut SqliteConnection,
    user_id: &str,
    product_id: &str,
    size: &str,
    color: &str,
) -> RepoResult<Option<CartItem>> {
    let row = sqlx::query_as::<_, CartItem>(
        "SELECT id, user_id, product_id, quantity, size, color, customizations, \
         created_at, updated_at \
         FROM cart_items \
         WHERE user_id = ? AND product_id = ? AND size = ? AND color = ?",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(size)
    .bind(color)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Find a cart line by id, scoped to its owner
pub async fn find_owned(
    conn: &mut SqliteConnection,
    item_id: &str,
    user_id: &str,
) -> RepoResult<Option<CartItem>> {
    let row = sqlx::query_as::<_, CartItem>(
        "SELECT id, user_id, product_id, quantity, size, color, customizations, \
         created_at, updated_at \
         FROM cart_items WHERE id = ? AND user_id = ?",
    )
    .bind(item_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Insert a new cart line
pub async fn insert(conn: &mut SqliteConnection, item: &CartItem) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO cart_items (id, user_id, product_id, quantity, size, color, \
         customizations, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&item.id)
    .bind(&item.user_id)
    .bind(&item.product_id)
    .bind(item.quantity)
    .bind(&item.size)
    .bind(&item.color)
    .bind(&item.customizations)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Overwrite a line's quantity
pub async fn set_quantity(
    conn: &mut SqliteConnection,
    item_id: &str,
    quantity: i64,
    now: DateTime<Utc>,
) -> RepoResult<u64> {
    let result = sqlx::query("UPDATE cart_items SET quantity = ?, updated_at = ? WHERE id = ?")
        .bind(quantity)
        .bind(now)
        .bind(item_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Delete one cart line
pub async fn delete(conn: &mut SqliteConnection, item_id: &str) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = ?")
        .bind(item_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Delete every line in a user's cart
pub async fn clear_for_user(conn: &mut SqliteConnection, user_id: &str) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
