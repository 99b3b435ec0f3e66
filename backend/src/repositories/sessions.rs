//! Session manager: opaque bearer tokens with an absolute expiry.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::types::UserId;
use crate::utils::token::generate_session_key;

/// Issues a session key for the user. Any existing session row is deleted
/// in the same transaction, keeping at most one active session per user.
pub async fn create_session(
    pool: &PgPool,
    user_id: UserId,
    ttl_seconds: u64,
) -> Result<String, sqlx::Error> {
    let key = generate_session_key();
    let valid_until = Utc::now() + Duration::seconds(ttl_seconds as i64);

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("INSERT INTO sessions (session_key, user_id, valid_until) VALUES ($1, $2, $3)")
        .bind(&key)
        .bind(user_id)
        .bind(valid_until)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(key)
}

/// Resolves a session key to its owner. Missing, orphaned, and expired
/// keys all come back as `None`; callers must not distinguish them.
pub async fn validate_session(
    pool: &PgPool,
    session_key: &str,
) -> Result<Option<UserId>, sqlx::Error> {
    let row: Option<(UserId, chrono::DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT s.user_id, s.valid_until
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.session_key = $1
        "#,
    )
    .bind(session_key)
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(|(user_id, valid_until)| (Utc::now() <= valid_until).then_some(user_id)))
}

/// Pushes the expiry forward. Returns false if the user has no session.
pub async fn bump_session(
    pool: &PgPool,
    user_id: UserId,
    ttl_seconds: u64,
) -> Result<bool, sqlx::Error> {
    let valid_until = Utc::now() + Duration::seconds(ttl_seconds as i64);
    let result = sqlx::query("UPDATE sessions SET valid_until = $1 WHERE user_id = $2")
        .bind(valid_until)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_sessions_for_user(pool: &PgPool, user_id: UserId) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .map(|_| ())
}

pub async fn cleanup_expired_sessions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE valid_until <= NOW()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
