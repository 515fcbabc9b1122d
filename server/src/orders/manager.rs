//! Order Manager
//!
//! Checkout and cart operations over one SQLite pool. Order creation runs as
//! a single transaction: address checks, price snapshots, coupon redemption,
//! stock decrements and cart cleanup either all land or none do. Stock and
//! coupon counters are advanced only through conditional updates, so two
//! racing checkouts cannot oversell or over-redeem.

use super::error::{OrderError, OrderResult};
use super::{OrderPage, pricing};
use crate::auth::CurrentUser;
use crate::db::models::{
    Address, CartAdd, CartItem, CartLine, CartSummary, Coupon, Order, OrderCreate, OrderDetail,
    OrderFilters, OrderItem, OrderStatus, OrderUpdate, Pagination, PaymentStatus, Product,
};
use crate::db::repository::order::OrderScope;
use crate::db::repository::{address, cart, coupon, order, product};
use crate::utils::order_number::generate_order_number;
use chrono::Utc;
use sqlx::SqliteConnection;
use sqlx::SqlitePool;
use sqlx::types::Json;
use tracing::{info, warn};
use uuid::Uuid;

/// Order and cart service
#[derive(Clone)]
pub struct OrderManager {
    pool: SqlitePool,
    tax_rate_bp: u32,
}

impl OrderManager {
    pub fn new(pool: SqlitePool, tax_rate_bp: u32) -> Self {
        Self { pool, tax_rate_bp }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Create an order from requested items, atomically.
    ///
    /// Statement order inside the transaction is fixed: address resolution,
    /// item validation and price snapshots, coupon lookup, totals, header and
    /// item inserts, conditional stock decrements, coupon redemption, cart
    /// cleanup. Any failure drops the transaction and rolls everything back.
    pub async fn create_order(
        &self,
        user_id: &str,
        data: OrderCreate,
    ) -> OrderResult<OrderDetail> {
        if data.items.is_empty() {
            return Err(OrderError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }
        if data.items.iter().any(|item| item.quantity < 1) {
            return Err(OrderError::Validation(
                "Item quantity must be at least 1".to_string(),
            ));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Addresses must exist and belong to the buyer; the client gets the
        // same message either way. Billing falls back to shipping.
        let shipping_country = match &data.shipping_address_id {
            Some(id) => {
                let addr = resolve_address(&mut tx, id, user_id, "shipping").await?;
                Some(addr.country)
            }
            None => None,
        };
        let billing_address_id = match &data.billing_address_id {
            Some(id) => {
                resolve_address(&mut tx, id, user_id, "billing").await?;
                Some(id.clone())
            }
            None => data.shipping_address_id.clone(),
        };

        // Snapshot prices and pre-check stock, cumulatively per product so a
        // product split across lines is counted once.
        let order_id = Uuid::new_v4().to_string();
        let mut requested: Vec<(Product, i64)> = Vec::new();
        let mut snapshots: Vec<OrderItem> = Vec::new();
        let mut subtotal_cents = 0i64;
        for line in &data.items {
            let product = product::find_active_by_id(&mut *tx, &line.product_id)
                .await?
                .ok_or_else(|| OrderError::NotFound(format!("Product {}", line.product_id)))?;

            let cumulative = match requested.iter_mut().find(|(p, _)| p.id == product.id) {
                Some((_, qty)) => {
                    *qty += line.quantity;
                    *qty
                }
                None => {
                    requested.push((product.clone(), line.quantity));
                    line.quantity
                }
            };
            if product.stock_quantity < cumulative {
                return Err(OrderError::InsufficientStock {
                    product: product.name,
                    available: product.stock_quantity,
                    requested: cumulative,
                });
            }

            let line_subtotal = product.price_cents * line.quantity;
            subtotal_cents += line_subtotal;
            snapshots.push(OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                product_slug: product.slug.clone(),
                product_image: product.primary_image(),
                unit_price_cents: product.price_cents,
                quantity: line.quantity,
                size: line.size.clone(),
                color: line.color.clone(),
                subtotal_cents: line_subtotal,
                created_at: now,
            });
        }

        // Coupon is validated against the pre-discount subtotal
        let mut applied_coupon: Option<Coupon> = None;
        let mut discount_cents = 0i64;
        if let Some(code) = data
            .coupon_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            let found = coupon::find_redeemable(&mut *tx, code, now)
                .await?
                .ok_or_else(|| {
                    OrderError::Validation("Invalid or expired coupon code".to_string())
                })?;
            if let Some(min) = found.min_order_cents
                && subtotal_cents < min
            {
                return Err(OrderError::Validation(format!(
                    "Coupon {} requires a minimum order of {} cents",
                    found.code, min
                )));
            }
            discount_cents = pricing::discount_cents(&found, subtotal_cents);
            applied_coupon = Some(found);
        }

        let tax_cents = pricing::tax_cents(subtotal_cents - discount_cents, self.tax_rate_bp);
        let shipping_cents = pricing::shipping_cents(subtotal_cents, shipping_country.as_deref());
        let total_cents = subtotal_cents + tax_cents + shipping_cents - discount_cents;

        let header = Order {
            id: order_id.clone(),
            order_number: generate_order_number(),
            user_id: user_id.to_string(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: data.payment_method,
            priority: data.priority,
            subtotal_cents,
            tax_cents,
            shipping_cents,
            discount_cents,
            total_cents,
            coupon_code: applied_coupon.as_ref().map(|c| c.code.clone()),
            shipping_address_id: data.shipping_address_id.clone(),
            billing_address_id,
            tracking_number: None,
            notes: data.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        order::insert_header(&mut *tx, &header).await?;
        for item in &snapshots {
            order::insert_item(&mut *tx, item).await?;
        }

        // Conditional decrements catch what the pre-check could not see,
        // concurrent orders that drained stock since the read above.
        for (product, quantity) in &requested {
            if !product::decrement_stock(&mut *tx, &product.id, *quantity).await? {
                let available = product::find_active_by_id(&mut *tx, &product.id)
                    .await?
                    .map(|p| p.stock_quantity)
                    .unwrap_or(0);
                warn!(product = %product.name, "Stock drained during checkout, rolling back");
                return Err(OrderError::InsufficientStock {
                    product: product.name.clone(),
                    available,
                    requested: *quantity,
                });
            }
        }

        if let Some(c) = &applied_coupon
            && !coupon::redeem(&mut *tx, &c.id).await?
        {
            // Another checkout took the last redemption since the read above
            return Err(OrderError::Validation(format!(
                "Coupon {} is no longer available",
                c.code
            )));
        }

        cart::clear_for_user(&mut *tx, user_id).await?;

        let detail = load_detail(&mut tx, &order_id, &OrderScope::Admin).await?;
        tx.commit().await?;
        info!(
            order_number = %detail.header.order_number,
            total_cents = detail.header.total_cents,
            "Order created"
        );
        Ok(detail)
    }

    /// Fetch one order with its item snapshots
    pub async fn get_order(&self, id: &str, scope: &OrderScope) -> OrderResult<OrderDetail> {
        let mut conn = self.pool.acquire().await?;
        load_detail(&mut conn, id, scope).await
    }

    /// Filtered, paginated listing. Pagination must already be clamped.
    pub async fn list_orders(
        &self,
        scope: &OrderScope,
        filters: &OrderFilters,
        pagination: Pagination,
    ) -> OrderResult<OrderPage> {
        let mut conn = self.pool.acquire().await?;
        let (orders, total) = order::list(&mut conn, scope, filters, pagination).await?;
        Ok(OrderPage {
            orders,
            total,
            page: pagination.page,
            limit: pagination.limit,
        })
    }

    /// Apply a partial update. Status, payment status, priority and tracking
    /// number are staff-only and are dropped from a customer's patch; notes
    /// is writable by the owner. An empty effective patch is a plain read.
    pub async fn update_order(
        &self,
        id: &str,
        update: OrderUpdate,
        actor: &CurrentUser,
    ) -> OrderResult<OrderDetail> {
        let mut tx = self.pool.begin().await?;
        let existing = order::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| OrderError::NotFound("Order".to_string()))?;

        let mut update = update;
        if !actor.role.can_manage_orders() {
            if existing.user_id != actor.id {
                return Err(OrderError::NotFound("Order".to_string()));
            }
            if update.status.is_some()
                || update.payment_status.is_some()
                || update.priority.is_some()
                || update.tracking_number.is_some()
            {
                warn!(order_id = %id, user_id = %actor.id, "Dropping staff-only fields from patch");
            }
            update.status = None;
            update.payment_status = None;
            update.priority = None;
            update.tracking_number = None;
        }

        let empty = update.status.is_none()
            && update.payment_status.is_none()
            && update.priority.is_none()
            && update.tracking_number.is_none()
            && update.notes.is_none();
        if !empty {
            order::apply_update(&mut *tx, id, &update, Utc::now()).await?;
        }
        let detail = load_detail(&mut tx, id, &OrderScope::Admin).await?;
        tx.commit().await?;
        Ok(detail)
    }

    /// Cancel an order that has not entered processing, restoring its stock
    /// in the same transaction.
    pub async fn cancel_order(&self, id: &str, actor: &CurrentUser) -> OrderResult<OrderDetail> {
        let mut tx = self.pool.begin().await?;
        let existing = order::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| OrderError::NotFound("Order".to_string()))?;
        if !actor.role.can_manage_orders() && existing.user_id != actor.id {
            return Err(OrderError::NotFound("Order".to_string()));
        }
        if !existing.status.is_cancellable() {
            return Err(OrderError::Conflict("Order cannot be cancelled".to_string()));
        }

        let items = order::items_for(&mut *tx, id).await?;
        for item in &items {
            product::restore_stock(&mut *tx, &item.product_id, item.quantity).await?;
        }
        order::set_status(&mut *tx, id, OrderStatus::Cancelled, Utc::now()).await?;

        let detail = load_detail(&mut tx, id, &OrderScope::Admin).await?;
        tx.commit().await?;
        info!(order_number = %detail.header.order_number, "Order cancelled");
        Ok(detail)
    }

    /// Administrative removal: marks the order cancelled without restoring
    /// stock. Shipped and delivered orders cannot be removed.
    pub async fn delete_order(&self, id: &str) -> OrderResult<()> {
        let mut tx = self.pool.begin().await?;
        let existing = order::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| OrderError::NotFound("Order".to_string()))?;
        if matches!(
            existing.status,
            OrderStatus::Shipped | OrderStatus::Delivered
        ) {
            return Err(OrderError::Validation(
                "Cannot delete an order that has been shipped or delivered".to_string(),
            ));
        }
        order::set_status(&mut *tx, id, OrderStatus::Cancelled, Utc::now()).await?;
        tx.commit().await?;
        info!(order_id = %id, "Order removed by administrator");
        Ok(())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The user's cart with estimated totals. Shipping is not estimated
    /// until an address is chosen at checkout.
    pub async fn get_cart(&self, user_id: &str) -> OrderResult<CartSummary> {
        let details = cart::list_for_user(&self.pool, user_id).await?;
        let items: Vec<CartLine> = details
            .into_iter()
            .map(|item| CartLine {
                subtotal_cents: item.line_subtotal_cents(),
                in_stock: item.in_stock(),
                item,
            })
            .collect();
        let subtotal_cents: i64 = items.iter().map(|line| line.subtotal_cents).sum();
        let estimated_tax_cents = pricing::tax_cents(subtotal_cents, self.tax_rate_bp);
        let estimated_shipping_cents = pricing::shipping_cents(subtotal_cents, None);
        Ok(CartSummary {
            items_count: items.len(),
            subtotal_cents,
            estimated_tax_cents,
            estimated_shipping_cents,
            estimated_total_cents: subtotal_cents + estimated_tax_cents + estimated_shipping_cents,
            items,
        })
    }

    /// Add to cart, merging with an existing line on the same
    /// (product, size, color) key. The merged quantity must fit stock.
    pub async fn add_to_cart(&self, user_id: &str, data: CartAdd) -> OrderResult<CartItem> {
        if data.quantity < 1 {
            return Err(OrderError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let product = product::find_active_by_id(&mut *tx, &data.product_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("Product {}", data.product_id)))?;

        let size = data.size.as_deref().map(str::trim).unwrap_or("").to_string();
        let color = data
            .color
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .to_string();

        let existing = cart::find_entry(&mut *tx, user_id, &product.id, &size, &color).await?;
        let merged = existing.as_ref().map(|e| e.quantity).unwrap_or(0) + data.quantity;
        if merged > product.stock_quantity {
            return Err(OrderError::InsufficientStock {
                product: product.name,
                available: product.stock_quantity,
                requested: merged,
            });
        }

        let now = Utc::now();
        let item = match existing {
            Some(mut entry) => {
                cart::set_quantity(&mut *tx, &entry.id, merged, now).await?;
                entry.quantity = merged;
                entry.updated_at = now;
                entry
            }
            None => {
                let item = CartItem {
                    id: Uuid::new_v4().to_string(),
                    user_id: user_id.to_string(),
                    product_id: product.id.clone(),
                    quantity: data.quantity,
                    size,
                    color,
                    customizations: data.customizations.map(Json),
                    created_at: now,
                    updated_at: now,
                };
                cart::insert(&mut *tx, &item).await?;
                item
            }
        };
        tx.commit().await?;
        Ok(item)
    }

    /// Overwrite a cart line's quantity, bounded by current stock
    pub async fn update_cart_item(
        &self,
        user_id: &str,
        item_id: &str,
        quantity: i64,
    ) -> OrderResult<CartItem> {
        if quantity < 1 {
            return Err(OrderError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let mut item = cart::find_owned(&mut *tx, item_id, user_id)
            .await?
            .ok_or_else(|| OrderError::NotFound("Cart item".to_string()))?;
        let product = product::find_active_by_id(&mut *tx, &item.product_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("Product {}", item.product_id)))?;
        if quantity > product.stock_quantity {
            return Err(OrderError::InsufficientStock {
                product: product.name,
                available: product.stock_quantity,
                requested: quantity,
            });
        }

        let now = Utc::now();
        cart::set_quantity(&mut *tx, &item.id, quantity, now).await?;
        tx.commit().await?;
        item.quantity = quantity;
        item.updated_at = now;
        Ok(item)
    }

    /// Remove one cart line
    pub async fn remove_cart_item(&self, user_id: &str, item_id: &str) -> OrderResult<()> {
        let mut conn = self.pool.acquire().await?;
        let item = cart::find_owned(&mut conn, item_id, user_id)
            .await?
            .ok_or_else(|| OrderError::NotFound("Cart item".to_string()))?;
        cart::delete(&mut conn, &item.id).await?;
        Ok(())
    }

    /// Empty the cart. Returns the number of removed lines.
    pub async fn clear_cart(&self, user_id: &str) -> OrderResult<u64> {
        let mut conn = self.pool.acquire().await?;
        Ok(cart::clear_for_user(&mut conn, user_id).await?)
    }
}

/// Resolve an address the buyer may use. Missing and foreign addresses get
/// the same client message; the ownership mismatch is logged for operators.
async fn resolve_address(
    conn: &mut SqliteConnection,
    address_id: &str,
    user_id: &str,
    kind: &str,
) -> OrderResult<Address> {
    let addr = address::find_by_id(conn, address_id)
        .await?
        .ok_or_else(|| OrderError::Validation(format!("Invalid {kind} address")))?;
    if addr.user_id != user_id {
        warn!(
            address_id = %address_id,
            owner = %addr.user_id,
            requester = %user_id,
            "Address used by a non-owner"
        );
        return Err(OrderError::Validation(format!("Invalid {kind} address")));
    }
    Ok(addr)
}

async fn load_detail(
    conn: &mut SqliteConnection,
    id: &str,
    scope: &OrderScope,
) -> OrderResult<OrderDetail> {
    let header = order::find_header(conn, id, scope)
        .await?
        .ok_or_else(|| OrderError::NotFound("Order".to_string()))?;
    let items = order::items_for(conn, id).await?;
    Ok(OrderDetail {
        header,
        items_count: items.len(),
        items,
    })
}
