//! Relationship oracle: read-only queries over the canonical
//! (low, high) friendship relation. The relation itself is managed
//! outside this service.

use sqlx::PgPool;

use crate::models::friend::Friend;
use crate::types::UserId;

/// Symmetric by construction: the pair is canonicalized before the
/// indexed lookup. A user is never their own friend.
pub async fn are_friends(pool: &PgPool, a: UserId, b: UserId) -> Result<bool, sqlx::Error> {
    if a == b {
        return Ok(false);
    }
    let (low, high) = (a.min(b), a.max(b));
    let row: Option<(i32,)> =
        sqlx::query_as("SELECT 1 FROM friendships WHERE user_id_low = $1 AND user_id_high = $2")
            .bind(low)
            .bind(high)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

/// All friends of `user_id` as (id, email), sorted by email.
pub async fn friends_of(pool: &PgPool, user_id: UserId) -> Result<Vec<Friend>, sqlx::Error> {
    sqlx::query_as::<_, Friend>(
        r#"
        SELECT u.id, u.email
        FROM friendships f
        JOIN users u
          ON u.id = CASE
                       WHEN f.user_id_low = $1 THEN f.user_id_high
                       ELSE f.user_id_low
                    END
        WHERE $1 IN (f.user_id_low, f.user_id_high)
        ORDER BY u.email
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
