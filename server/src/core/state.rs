//! Server state - shared handles for all request handlers
//!
//! [`ServerState`] holds the immutable config, the SQLite connection pool and
//! the JWT service. It is `Clone` (Arc-backed internals) and is installed as
//! the axum router state; handlers construct the managers they need from it
//! instead of going through module-level singletons.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderManager;
use crate::utils::AppError;

/// Server state - holds shared service handles
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT verification service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Create server state from existing parts (used by tests)
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// Initialize server state: open the database, run migrations, build services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));

        Ok(Self::new(config.clone(), db_service.pool, jwt_service))
    }

    /// Get the connection pool
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Build an order manager bound to this state's pool
    pub fn order_manager(&self) -> OrderManager {
        OrderManager::new(self.pool.clone(), self.config.tax_rate_bp)
    }
}
