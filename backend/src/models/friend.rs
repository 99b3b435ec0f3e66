use serde::Serialize;
use sqlx::FromRow;

use crate::types::UserId;

/// What the friends list exposes about another user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Friend {
    pub id: UserId,
    pub email: String,
}
