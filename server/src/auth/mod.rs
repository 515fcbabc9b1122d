//! Authentication module
//!
//! Resolves the caller identity fact the order core consumes: a user id plus
//! a role. Token issuance and password handling live with the auth provider.

mod extractor;
mod jwt;

pub use jwt::{Claims, JwtError, JwtService};

use serde::{Deserialize, Serialize};

/// Caller role, gates privileged order fields and admin routes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Designer,
    Admin,
}

impl Role {
    /// Whether this role may edit privileged order fields
    /// (status, payment status, priority, tracking number)
    pub fn can_manage_orders(self) -> bool {
        matches!(self, Role::Admin | Role::Designer)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "designer" => Ok(Role::Designer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Customer => "customer",
            Role::Designer => "designer",
            Role::Admin => "admin",
        };
        f.write_str(s)
    }
}

/// Authenticated caller identity
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub role: Role,
}
