//! API Route Modules
//!
//! - [`health`] - liveness and component checks
//! - [`products`] - public catalog reads
//! - [`cart`] - authenticated cart maintenance
//! - [`orders`] - customer checkout and order access
//! - [`admin_orders`] - staff order board and administration

pub mod admin_orders;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
