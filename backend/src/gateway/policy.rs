//! The single decision point for dropping invalid realtime requests.
//!
//! Self targets, non-friends, malformed ids, and lookup failures all
//! produce `None` with no reply to the client, so a client cannot probe
//! which accounts exist or who is friends with whom. The reasons only
//! reach the server log.

use sqlx::PgPool;

use crate::gateway::rooms::RoomId;
use crate::repositories::friendships;
use crate::types::UserId;
use crate::validation::rules;

/// Resolves a requested friend target to a room, or decides to drop.
pub async fn authorize_dm(pool: &PgPool, user_id: UserId, friend_id: i64) -> Option<RoomId> {
    if !rules::plausible_user_id(friend_id) {
        tracing::debug!(user_id, friend_id, "drop: malformed friend id");
        return None;
    }
    if friend_id == user_id {
        tracing::debug!(user_id, "drop: self target");
        return None;
    }
    match friendships::are_friends(pool, user_id, friend_id).await {
        Ok(true) => RoomId::new(user_id, friend_id),
        Ok(false) => {
            tracing::debug!(user_id, friend_id, "drop: not friends");
            None
        }
        Err(e) => {
            // Fail closed when the store cannot answer.
            tracing::warn!(user_id, friend_id, error = %e, "drop: friendship lookup failed");
            None
        }
    }
}
