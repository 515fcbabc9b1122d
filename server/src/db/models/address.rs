//! Address Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Address owned by exactly one user, referenced by id from orders
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub id: String,
    pub user_id: String,
    pub recipient: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}
