//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResponse`] - unified error and response types
//! - [`order_number`] - human-facing order number generation
//! - logging setup

pub mod error;
pub mod logger;
pub mod order_number;
pub mod result;

pub use error::{AppError, AppResponse, ok, ok_with_message};
pub use result::AppResult;
