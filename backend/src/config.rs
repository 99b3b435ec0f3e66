use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Session lifetime; sending a message pushes the expiry forward by this much.
    pub session_ttl_seconds: u64,
    /// Whether the session cookie carries the `Secure` attribute. Disable
    /// only for plain-HTTP local development.
    pub cookie_secure: bool,
    pub max_message_len: usize,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://postgres@localhost/dovecote".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .unwrap_or(120);

        let cookie_secure = env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let max_message_len = env::var("MAX_MESSAGE_LEN")
            .unwrap_or_else(|_| "2000".to_string())
            .parse()
            .unwrap_or(2000);

        Ok(Config {
            database_url,
            bind_addr,
            session_ttl_seconds,
            cookie_secure,
            max_message_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_falls_back_to_defaults() {
        let config = Config::load().expect("load config");
        assert!(!config.database_url.is_empty());
        assert!(config.session_ttl_seconds > 0);
        assert!(config.max_message_len > 0);
    }
}
