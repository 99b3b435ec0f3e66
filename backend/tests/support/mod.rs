//! Shared fixtures for the DB-backed integration tests.

use std::sync::OnceLock;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::Mutex;

use dovecote_backend::repositories::users;
use dovecote_backend::types::UserId;

/// Serializes the DB-backed tests within this binary; they share tables.
pub async fn integration_guard() -> tokio::sync::MutexGuard<'static, ()> {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(())).lock().await
}

/// Connects to the database named by DATABASE_URL and runs migrations.
/// Returns None when the variable is unset or the database is down, so
/// the suite can run without a live Postgres.
pub async fn try_pool() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;
    sqlx::migrate!("./migrations").run(&pool).await.ok()?;
    Some(pool)
}

pub async fn reset(pool: &PgPool) {
    sqlx::query("TRUNCATE messages, sessions, friendships, users RESTART IDENTITY CASCADE")
        .execute(pool)
        .await
        .expect("truncate tables");
}

pub async fn seed_user(pool: &PgPool, login: &str, email: &str) -> UserId {
    users::create_user(pool, login, email, "hunter2!")
        .await
        .expect("seed user")
}

/// The friendship relation is externally managed; tests seed it directly.
pub async fn befriend(pool: &PgPool, a: UserId, b: UserId) {
    sqlx::query("INSERT INTO friendships (user_id_low, user_id_high) VALUES ($1, $2)")
        .bind(a.min(b))
        .bind(a.max(b))
        .execute(pool)
        .await
        .expect("insert friendship");
}
