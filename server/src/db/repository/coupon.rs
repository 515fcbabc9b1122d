//! Coupon Repository

use super::RepoResult;
use crate::db::models::Coupon;
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

/// Find a coupon that is active, unexpired and under its usage limit
pub async fn find_redeemable(
    conn: &mut SqliteConnection,
    code: &str,
    now: DateTime<Utc>,
) -> RepoResult<Option<Coupon>> {
    let row = sqlx::query_as::<_, Coupon>(
        "SELECT id, code, discount_type, discount_value, min_order_cents, max_discount_cents, \
         expires_at, usage_limit, used_count, is_active, created_at \
         FROM coupons \
         WHERE code = ? AND is_active = 1 \
         AND (expires_at IS NULL OR expires_at > ?) \
         AND (usage_limit IS NULL OR used_count < usage_limit)",
    )
    .bind(code)
    .bind(now)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Advance the redemption counter, guarded against the usage limit.
/// Returns false when a concurrent redemption exhausted the coupon first.
pub async fn redeem(conn: &mut SqliteConnection, coupon_id: &str) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE coupons SET used_count = used_count + 1 \
         WHERE id = ? AND (usage_limit IS NULL OR used_count < usage_limit)",
    )
    .bind(coupon_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}
