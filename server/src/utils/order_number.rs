//! Order number generation
//!
//! Human-facing identifiers, distinct from the internal uuid:
//! `ORD-YYYYMMDD-` date prefix plus a 6-digit random suffix.

use chrono::Utc;
use rand::Rng;

/// Generate a unique order number
pub fn generate_order_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("ORD-{date}-{suffix:06}")
}
