//! Atelier Server - order backend for a made-to-measure tailoring storefront
//!
//! The core of the service is the checkout workflow: turning a set of
//! requested items into an order with frozen price snapshots, inside one
//! database transaction that also decrements stock, redeems the coupon and
//! clears the buyer's cart.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # config, state, HTTP server
//! ├── auth/          # JWT verification, roles, extractor
//! ├── db/            # pool setup, models, repositories
//! ├── orders/        # pricing, checkout workflow, cart
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, order numbers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderManager, OrderScope};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and set up logging from LOG_LEVEL / LOG_DIR
pub fn setup_environment() {
    dotenvy::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
