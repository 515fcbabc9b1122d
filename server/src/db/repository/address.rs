//! Address Repository

use super::RepoResult;
use crate::db::models::Address;
use sqlx::SqliteConnection;

/// Find an address by id, regardless of owner.
/// Ownership is checked by the caller so a mismatch can be logged distinctly.
pub async fn find_by_id(conn: &mut SqliteConnection, id: &str) -> RepoResult<Option<Address>> {
    let row = sqlx::query_as::<_, Address>(
        "SELECT id, user_id, recipient, line1, line2, city, state, postal_code, country, \
         created_at FROM addresses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}
