//! User account model and the authentication form payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::types::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of a registered account. Immutable after
/// registration: there is deliberately no update path for user rows.
pub struct User {
    pub id: UserId,
    /// Display name chosen at registration.
    pub login: String,
    /// Unique, used for login and shown to friends.
    pub email: String,
    /// Hex digest of password + salt; the plaintext is never stored.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Per-user random salt, hex encoded.
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    pub login: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}
