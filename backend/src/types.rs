//! Aliases for database-assigned keys.

pub type UserId = i64;
pub type MessageId = i64;
