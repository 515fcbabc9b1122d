//! Order Management Module
//!
//! Owns the checkout workflow: cart maintenance, price computation and the
//! transactional conversion of a set of requested items into an order with
//! frozen price snapshots.

pub mod error;
pub mod manager;
pub mod pricing;

pub use error::{OrderError, OrderResult};
pub use manager::OrderManager;

pub use crate::db::repository::order::OrderScope;

use crate::db::models::OrderSummary;
use serde::Serialize;

/// One page of an order listing
#[derive(Debug, Clone, Serialize)]
pub struct OrderPage {
    pub orders: Vec<OrderSummary>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
