//! Repository Module
//!
//! Parameterized-query CRUD over the SQLite pool. Functions that participate
//! in the order-creation transaction take `&mut SqliteConnection` so the
//! manager can pass its transaction through; plain reads take the pool.

pub mod address;
pub mod cart;
pub mod coupon;
pub mod order;
pub mod product;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
