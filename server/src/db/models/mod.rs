//! Database Models

// Catalog
pub mod product;

// Checkout inputs
pub mod address;
pub mod coupon;

// Orders and cart
pub mod cart;
pub mod order;

// Re-exports
pub use address::Address;
pub use cart::{CartAdd, CartItem, CartItemDetail, CartLine, CartSummary};
pub use coupon::{Coupon, DiscountType};
pub use order::{
    DesignerOrderCreate, Order, OrderCreate, OrderDetail, OrderFilters, OrderHeader, OrderItem,
    OrderItemRequest, OrderPriority, OrderStatus, OrderSummary, OrderUpdate, PaymentMethod,
    PaymentStatus, SortBy, SortOrder,
};
pub use product::Product;

use serde::Deserialize;

/// Page/limit pagination with a server-enforced cap
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Clamp to sane bounds: page >= 1, 1 <= limit <= max
    pub fn clamped(self, max_limit: i64) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, max_limit),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}
