//! Order Models
//!
//! Order header, owned order items (frozen price snapshots), request/response
//! DTOs and the structured listing filter.
//!
//! Monetary invariant on every order:
//! `total_cents == subtotal_cents + tax_cents + shipping_cents - discount_cents`,
//! each component non-negative, `discount_cents <= subtotal_cents`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Order lifecycle status
///
/// `pending → confirmed → processing → shipped → delivered`, with
/// `cancelled` and `refunded` as side branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Customer cancellation is only allowed before processing starts
    pub fn is_cancellable(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    CashOnDelivery,
    MobileMoney,
}

/// Order priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for OrderPriority {
    fn default() -> Self {
        OrderPriority::Medium
    }
}

// =============================================================================
// Entities
// =============================================================================

/// Order header row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub priority: OrderPriority,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub shipping_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub coupon_code: Option<String>,
    pub shipping_address_id: Option<String>,
    pub billing_address_id: Option<String>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order item — frozen snapshot of the product at order time.
/// Created only alongside its order, read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_slug: String,
    pub product_image: Option<String>,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
    pub subtotal_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// Order header joined with the customer identity (for API responses)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderHeader {
    pub id: String,
    pub order_number: String,
    pub user_id: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub priority: OrderPriority,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub shipping_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub coupon_code: Option<String>,
    pub shipping_address_id: Option<String>,
    pub billing_address_id: Option<String>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full order detail: header plus owned items
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: OrderHeader,
    pub items: Vec<OrderItem>,
    pub items_count: usize,
}

/// Compact row for order listings
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub priority: OrderPriority,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub total_cents: i64,
    pub items_count: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Request DTOs
// =============================================================================

/// One requested line in an order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Order creation request
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<OrderItemRequest>,
    pub shipping_address_id: Option<String>,
    pub billing_address_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub priority: OrderPriority,
    pub coupon_code: Option<String>,
    pub notes: Option<String>,
}

/// Addressless order creation request (designer/internal orders)
#[derive(Debug, Clone, Deserialize)]
pub struct DesignerOrderCreate {
    pub items: Vec<OrderItemRequest>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub priority: OrderPriority,
    pub notes: Option<String>,
}

impl From<DesignerOrderCreate> for OrderCreate {
    fn from(data: DesignerOrderCreate) -> Self {
        OrderCreate {
            items: data.items,
            shipping_address_id: None,
            billing_address_id: None,
            payment_method: data.payment_method,
            priority: data.priority,
            coupon_code: None,
            notes: data.notes,
        }
    }
}

/// Order patch. Status, payment status, priority and tracking number are
/// privileged fields; notes is customer-writable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub priority: Option<OrderPriority>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
}

// =============================================================================
// Listing filters
// =============================================================================

/// Sortable columns — a closed allow-list, never interpolated caller input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    CreatedAt,
    UpdatedAt,
    TotalCents,
    OrderNumber,
    Priority,
}

impl SortBy {
    pub fn column(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "o.created_at",
            SortBy::UpdatedAt => "o.updated_at",
            SortBy::TotalCents => "o.total_cents",
            SortBy::OrderNumber => "o.order_number",
            SortBy::Priority => "o.priority",
        }
    }
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::CreatedAt
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

/// Structured filter object for order listings
///
/// Every field is bound as a query parameter; `sort_by`/`sort_order` select
/// from the allow-lists above. Caller text never reaches the SQL string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub priority: Option<OrderPriority>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub min_total_cents: Option<i64>,
    pub max_total_cents: Option<i64>,
    /// Matches order number, customer name or email
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_columns_come_from_the_allow_list() {
        let columns = [
            SortBy::CreatedAt,
            SortBy::UpdatedAt,
            SortBy::TotalCents,
            SortBy::OrderNumber,
            SortBy::Priority,
        ]
        .map(SortBy::column);
        for column in columns {
            assert!(column.starts_with("o."));
            assert!(column.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_'));
        }
    }

    #[test]
    fn unknown_sort_key_fails_deserialization() {
        let err = serde_json::from_str::<SortBy>("\"created_at; DROP TABLE orders\"");
        assert!(err.is_err());
        let ok: SortBy = serde_json::from_str("\"total_cents\"").unwrap();
        assert_eq!(ok, SortBy::TotalCents);
    }

    #[test]
    fn only_early_states_are_cancellable() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(OrderStatus::Confirmed.is_cancellable());
        assert!(!OrderStatus::Processing.is_cancellable());
        assert!(!OrderStatus::Shipped.is_cancellable());
        assert!(!OrderStatus::Delivered.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }
}
