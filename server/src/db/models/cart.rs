//! Cart Models
//!
//! A cart row is keyed by (user, product, size, color); adding the same
//! combination again sums quantities instead of inserting a duplicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Cart row as stored. Size/color are normalized to empty strings so the
/// uniqueness key behaves with SQLite's NULL semantics.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartItem {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub size: String,
    pub color: String,
    pub customizations: Option<Json<serde_json::Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cart row joined with live product data for display
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItemDetail {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_slug: String,
    pub product_image: Option<String>,
    pub price_cents: i64,
    pub stock_quantity: i64,
    pub quantity: i64,
    pub size: String,
    pub color: String,
    pub customizations: Option<Json<serde_json::Value>>,
    pub created_at: DateTime<Utc>,
}

impl CartItemDetail {
    pub fn line_subtotal_cents(&self) -> i64 {
        self.price_cents * self.quantity
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity >= self.quantity
    }
}

/// Add-to-cart request
#[derive(Debug, Clone, Deserialize)]
pub struct CartAdd {
    pub product_id: String,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
    pub customizations: Option<serde_json::Value>,
}

/// Cart with estimated totals
#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub items_count: usize,
    pub subtotal_cents: i64,
    pub estimated_tax_cents: i64,
    pub estimated_shipping_cents: i64,
    pub estimated_total_cents: i64,
}

/// One display line in the cart summary
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItemDetail,
    pub subtotal_cents: i64,
    pub in_stock: bool,
}
