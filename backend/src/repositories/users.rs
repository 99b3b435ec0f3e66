//! Credential store: account creation and password verification.

use sqlx::PgPool;

use crate::models::user::User;
use crate::types::UserId;
use crate::utils::password::{generate_salt, hash_password, verify_password};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("unknown email")]
    NotFound,
    #[error("password mismatch")]
    BadPassword,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Creates an account with a fresh salt. Duplicate detection is left to
/// the UNIQUE constraint on `email`, so two concurrent registrations
/// cannot both succeed.
pub async fn create_user(
    pool: &PgPool,
    login: &str,
    email: &str,
    password: &str,
) -> Result<UserId, RegisterError> {
    let salt = generate_salt();
    let hash = hash_password(password, &salt);

    let result = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (login, email, password_hash, password_salt)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(login)
    .bind(email)
    .bind(&hash)
    .bind(&salt)
    .fetch_one(pool)
    .await;

    match result {
        Ok(id) => Ok(id),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(RegisterError::DuplicateEmail)
        }
        Err(e) => Err(RegisterError::Database(e)),
    }
}

/// Recomputes the digest with the stored salt and compares. Unknown email
/// and wrong password are distinct here; callers collapse them before
/// anything reaches a client.
pub async fn verify_credentials(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<User, VerifyError> {
    let user = find_user_by_email(pool, email)
        .await?
        .ok_or(VerifyError::NotFound)?;
    if !verify_password(password, &user.password_salt, &user.password_hash) {
        return Err(VerifyError::BadPassword);
    }
    Ok(user)
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, login, email, password_hash, password_salt, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_id(pool: &PgPool, user_id: UserId) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, login, email, password_hash, password_salt, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
