//! Shared test fixtures: in-memory database plus seed helpers.

#![allow(dead_code)]

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// One-connection in-memory pool with the schema applied.
/// A single connection keeps every handle on the same in-memory database.
pub async fn setup_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .pragma("foreign_keys", "ON");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

/// File-backed WAL pool with one connection per racing task, so concurrent
/// transactions genuinely overlap instead of serializing on a single handle.
/// The returned guard removes the database files when dropped.
pub async fn setup_file_pool(max_connections: u32) -> (SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .pragma("foreign_keys", "ON");
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    (pool, dir)
}

pub async fn seed_user(pool: &SqlitePool, id: &str, role: &str) {
    sqlx::query("INSERT INTO users (id, name, email, role, is_active, created_at) VALUES (?, ?, ?, ?, 1, ?)")
        .bind(id)
        .bind(format!("User {id}"))
        .bind(format!("{id}@example.com"))
        .bind(role)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
}

pub async fn seed_product(pool: &SqlitePool, id: &str, price_cents: i64, stock: i64) {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO products (id, name, slug, price_cents, stock_quantity, images, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, '[\"https://img.example/main.jpg\"]', 1, ?, ?)",
    )
    .bind(id)
    .bind(format!("Product {id}"))
    .bind(id)
    .bind(price_cents)
    .bind(stock)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn seed_address(pool: &SqlitePool, id: &str, user_id: &str, country: &str) {
    sqlx::query(
        "INSERT INTO addresses (id, user_id, recipient, line1, city, postal_code, country, created_at) \
         VALUES (?, ?, 'Recipient', '1 Main St', 'Springfield', '12345', ?, ?)",
    )
    .bind(id)
    .bind(user_id)
    .bind(country)
    .bind(Utc::now())
    .execute(pool)
    .await
    .unwrap();
}

pub async fn seed_coupon(
    pool: &SqlitePool,
    id: &str,
    code: &str,
    discount_type: &str,
    discount_value: i64,
    min_order_cents: Option<i64>,
    usage_limit: Option<i64>,
) {
    sqlx::query(
        "INSERT INTO coupons (id, code, discount_type, discount_value, min_order_cents, usage_limit, is_active, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, 1, ?)",
    )
    .bind(id)
    .bind(code)
    .bind(discount_type)
    .bind(discount_value)
    .bind(min_order_cents)
    .bind(usage_limit)
    .bind(Utc::now())
    .execute(pool)
    .await
    .unwrap();
}

pub async fn stock_of(pool: &SqlitePool, product_id: &str) -> i64 {
    sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn order_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn coupon_used_count(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT used_count FROM coupons WHERE code = ?")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn cart_row_count(pool: &SqlitePool, user_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
