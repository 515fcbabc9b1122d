//! Coupon Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coupon discount type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` is an integer percent (10 = 10%)
    Percentage,
    /// `discount_value` is cents
    Fixed,
}

/// Coupon entity
///
/// Invariant: `used_count <= usage_limit` whenever a limit is set. The
/// redemption counter is only ever advanced by the conditional update in the
/// coupon repository, inside the order-creation transaction.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_order_cents: Option<i64>,
    pub max_discount_cents: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<i64>,
    pub used_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
