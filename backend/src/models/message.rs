use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::types::{MessageId, UserId};

/// A persisted direct message. Immutable once created; `id` and
/// `created_at` are assigned by the database at insertion.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
