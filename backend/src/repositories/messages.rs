//! Conversation store: append-only messages with store-assigned ordering.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::message::Message;
use crate::types::{MessageId, UserId};

/// Persists a message. `id` and `created_at` are assigned atomically by
/// the insert, which is the serialization point for conversation order.
/// Body validation happens at the boundary, not here.
pub async fn append_message(
    pool: &PgPool,
    sender_id: UserId,
    receiver_id: UserId,
    body: &str,
) -> Result<(MessageId, DateTime<Utc>), sqlx::Error> {
    sqlx::query_as::<_, (MessageId, DateTime<Utc>)>(
        r#"
        INSERT INTO messages (sender_id, receiver_id, body)
        VALUES ($1, $2, $3)
        RETURNING id, created_at
        "#,
    )
    .bind(sender_id)
    .bind(receiver_id)
    .bind(body)
    .fetch_one(pool)
    .await
}

/// The last `limit` messages exchanged between the two users in either
/// direction, returned oldest-first.
pub async fn recent_messages(
    pool: &PgPool,
    a: UserId,
    b: UserId,
    limit: i64,
) -> Result<Vec<Message>, sqlx::Error> {
    let mut rows = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, sender_id, receiver_id, body, created_at
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY id DESC
        LIMIT $3
        "#,
    )
    .bind(a)
    .bind(b)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    // Retrieval is newest-first for the LIMIT; flip to chronological.
    rows.reverse();
    Ok(rows)
}
