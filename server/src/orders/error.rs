//! Order Error Types
//!
//! Failure modes of the checkout workflow as data, so handlers and tests can
//! match on the cause instead of parsing messages.

use crate::db::repository::RepoError;
use crate::utils::AppError;
use thiserror::Error;

/// Errors from order and cart operations
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("Insufficient stock for {product}: {available} available, {requested} requested")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<RepoError> for OrderError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => OrderError::NotFound(msg),
            RepoError::Duplicate(msg) => OrderError::Conflict(msg),
            RepoError::Validation(msg) => OrderError::Validation(msg),
            RepoError::Database(msg) => OrderError::Database(msg),
        }
    }
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => AppError::Validation(msg),
            OrderError::InsufficientStock { .. } => AppError::Validation(err.to_string()),
            OrderError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
            OrderError::Conflict(msg) => AppError::Conflict(msg),
            OrderError::Database(msg) => AppError::Database(msg),
        }
    }
}
