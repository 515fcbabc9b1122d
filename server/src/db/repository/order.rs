//! Order Repository
//!
//! Header/item persistence plus the filtered listing query. Listing is built
//! with `QueryBuilder`: every caller value goes through `push_bind`, and the
//! sort column comes from the `SortBy` allow-list only.

use super::RepoResult;
use crate::db::models::{
    Order, OrderFilters, OrderHeader, OrderItem, OrderStatus, OrderSummary, OrderUpdate,
    Pagination,
};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// Visibility scope for order reads
#[derive(Debug, Clone)]
pub enum OrderScope {
    /// Only the given user's orders
    Customer(String),
    /// Every order
    Admin,
}

const HEADER_COLUMNS: &str = "o.id, o.order_number, o.user_id, \
     u.name AS customer_name, u.email AS customer_email, \
     o.status, o.payment_status, o.payment_method, o.priority, \
     o.subtotal_cents, o.tax_cents, o.shipping_cents, o.discount_cents, o.total_cents, \
     o.coupon_code, o.shipping_address_id, o.billing_address_id, \
     o.tracking_number, o.notes, o.created_at, o.updated_at";

/// Insert an order header
pub async fn insert_header(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, user_id, status, payment_status, \
         payment_method, priority, subtotal_cents, tax_cents, shipping_cents, \
         discount_cents, total_cents, coupon_code, shipping_address_id, \
         billing_address_id, tracking_number, notes, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&order.id)
    .bind(&order.order_number)
    .bind(&order.user_id)
    .bind(order.status)
    .bind(order.payment_status)
    .bind(order.payment_method)
    .bind(order.priority)
    .bind(order.subtotal_cents)
    .bind(order.tax_cents)
    .bind(order.shipping_cents)
    .bind(order.discount_cents)
    .bind(order.total_cents)
    .bind(&order.coupon_code)
    .bind(&order.shipping_address_id)
    .bind(&order.billing_address_id)
    .bind(&order.tracking_number)
    .bind(&order.notes)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Insert one order item snapshot
pub async fn insert_item(conn: &mut SqliteConnection, item: &OrderItem) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, product_id, product_name, product_slug, \
         product_image, unit_price_cents, quantity, size, color, subtotal_cents, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&item.id)
    .bind(&item.order_id)
    .bind(&item.product_id)
    .bind(&item.product_name)
    .bind(&item.product_slug)
    .bind(&item.product_image)
    .bind(item.unit_price_cents)
    .bind(item.quantity)
    .bind(&item.size)
    .bind(&item.color)
    .bind(item.subtotal_cents)
    .bind(item.created_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Find an order row by id
pub async fn find_by_id(conn: &mut SqliteConnection, id: &str) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(
        "SELECT id, order_number, user_id, status, payment_status, payment_method, priority, \
         subtotal_cents, tax_cents, shipping_cents, discount_cents, total_cents, coupon_code, \
         shipping_address_id, billing_address_id, tracking_number, notes, created_at, updated_at \
         FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Find an order header joined with the customer, optionally scoped to an owner
pub async fn find_header(
    conn: &mut SqliteConnection,
    id: &str,
    scope: &OrderScope,
) -> RepoResult<Option<OrderHeader>> {
    let base = format!(
        "SELECT {HEADER_COLUMNS} FROM orders o LEFT JOIN users u ON u.id = o.user_id \
         WHERE o.id = ?",
    );
    let row = match scope {
        OrderScope::Admin => {
            sqlx::query_as::<_, OrderHeader>(&base)
                .bind(id)
                .fetch_optional(conn)
                .await?
        }
        OrderScope::Customer(user_id) => {
            sqlx::query_as::<_, OrderHeader>(&format!("{base} AND o.user_id = ?"))
                .bind(id)
                .bind(user_id)
                .fetch_optional(conn)
                .await?
        }
    };
    Ok(row)
}

/// Load the item snapshots belonging to an order
pub async fn items_for(conn: &mut SqliteConnection, order_id: &str) -> RepoResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_id, product_name, product_slug, product_image, \
         unit_price_cents, quantity, size, color, subtotal_cents, created_at \
         FROM order_items WHERE order_id = ? ORDER BY created_at ASC, id ASC",
    )
    .bind(order_id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

/// Apply a partial update; absent fields keep their stored value
pub async fn apply_update(
    conn: &mut SqliteConnection,
    id: &str,
    update: &OrderUpdate,
    now: DateTime<Utc>,
) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE orders SET \
         status = COALESCE(?, status), \
         payment_status = COALESCE(?, payment_status), \
         priority = COALESCE(?, priority), \
         tracking_number = COALESCE(?, tracking_number), \
         notes = COALESCE(?, notes), \
         updated_at = ? \
         WHERE id = ?",
    )
    .bind(update.status)
    .bind(update.payment_status)
    .bind(update.priority)
    .bind(&update.tracking_number)
    .bind(&update.notes)
    .bind(now)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

/// Overwrite an order's status
pub async fn set_status(
    conn: &mut SqliteConnection,
    id: &str,
    status: OrderStatus,
    now: DateTime<Utc>,
) -> RepoResult<u64> {
    let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Filtered, sorted, paginated listing. Returns the page plus the total
/// row count for the same filter set.
pub async fn list(
    conn: &mut SqliteConnection,
    scope: &OrderScope,
    filters: &OrderFilters,
    pagination: Pagination,
) -> RepoResult<(Vec<OrderSummary>, i64)> {
    let mut count_qb = QueryBuilder::<Sqlite>::new(
        "SELECT COUNT(*) FROM orders o LEFT JOIN users u ON u.id = o.user_id WHERE 1 = 1",
    );
    push_filters(&mut count_qb, scope, filters);
    let total: i64 = count_qb
        .build_query_scalar()
        .fetch_one(&mut *conn)
        .await?;

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT o.id, o.order_number, o.status, o.payment_status, o.priority, \
         u.name AS customer_name, u.email AS customer_email, o.total_cents, \
         (SELECT COUNT(*) FROM order_items oi WHERE oi.order_id = o.id) AS items_count, \
         o.created_at \
         FROM orders o LEFT JOIN users u ON u.id = o.user_id WHERE 1 = 1",
    );
    push_filters(&mut qb, scope, filters);
    qb.push(" ORDER BY ")
        .push(filters.sort_by.column())
        .push(" ")
        .push(filters.sort_order.keyword())
        .push(" LIMIT ")
        .push_bind(pagination.limit)
        .push(" OFFSET ")
        .push_bind(pagination.offset());

    let rows = qb
        .build_query_as::<OrderSummary>()
        .fetch_all(&mut *conn)
        .await?;
    Ok((rows, total))
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, scope: &OrderScope, filters: &OrderFilters) {
    match scope {
        OrderScope::Customer(user_id) => {
            qb.push(" AND o.user_id = ").push_bind(user_id.clone());
        }
        OrderScope::Admin => {
            // Cancelled orders stay out of the admin board unless asked for
            if filters.status.is_none() {
                qb.push(" AND o.status != 'cancelled'");
            }
        }
    }
    if let Some(status) = filters.status {
        qb.push(" AND o.status = ").push_bind(status);
    }
    if let Some(payment_status) = filters.payment_status {
        qb.push(" AND o.payment_status = ").push_bind(payment_status);
    }
    if let Some(payment_method) = filters.payment_method {
        qb.push(" AND o.payment_method = ").push_bind(payment_method);
    }
    if let Some(priority) = filters.priority {
        qb.push(" AND o.priority = ").push_bind(priority);
    }
    if let Some(date_from) = filters.date_from {
        qb.push(" AND o.created_at >= ").push_bind(date_from);
    }
    if let Some(date_to) = filters.date_to {
        qb.push(" AND o.created_at <= ").push_bind(date_to);
    }
    if let Some(min_total) = filters.min_total_cents {
        qb.push(" AND o.total_cents >= ").push_bind(min_total);
    }
    if let Some(max_total) = filters.max_total_cents {
        qb.push(" AND o.total_cents <= ").push_bind(max_total);
    }
    if let Some(search) = &filters.search {
        let pattern = format!("%{}%", search.trim());
        qb.push(" AND (o.order_number LIKE ")
            .push_bind(pattern.clone())
            .push(" OR u.name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR u.email LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
