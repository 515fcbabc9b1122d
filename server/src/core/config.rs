//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | DATABASE_PATH | atelier.db | SQLite database file |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | JWT_SECRET | (dev default) | HMAC secret for bearer tokens |
//! | TAX_RATE_BP | 800 | Sales tax rate in basis points (800 = 8%) |
//! | MAX_PAGE_SIZE | 100 | Server-enforced pagination cap |

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// HMAC secret for JWT verification
    pub jwt_secret: String,
    /// Sales tax rate in basis points
    pub tax_rate_bp: u32,
    /// Maximum page size for list endpoints
    pub max_page_size: i64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "atelier.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "atelier-dev-secret-change-in-production".into()),
            tax_rate_bp: std::env::var("TAX_RATE_BP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),
            max_page_size: std::env::var("MAX_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
