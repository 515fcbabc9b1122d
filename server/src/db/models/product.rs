//! Product Model
//!
//! Catalog collaborator: the order core consumes the active flag, the current
//! price and the stock level, and snapshots name/slug/images into order items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Catalog product entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock_quantity: i64,
    pub images: Json<Vec<String>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// First catalog image, used for order item snapshots
    pub fn primary_image(&self) -> Option<String> {
        self.images.0.first().cloned()
    }
}
