// src/config.rs

use std::env;
use std::time::Duration;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub port: u16,
    /// Recognised answers required before an assessment is saved.
    pub min_assessment_answers: usize,
    /// Deadline for loading a parent's family data.
    pub family_load_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        Self {
            database_url,
            jwt_secret,
            jwt_expiration: parse_or("JWT_EXPIRATION", 86_400),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            port: parse_or("PORT", 3000),
            min_assessment_answers: parse_or("MIN_ASSESSMENT_ANSWERS", 5),
            family_load_timeout_ms: parse_or("FAMILY_LOAD_TIMEOUT_MS", 5_000),
        }
    }

    pub fn family_load_timeout(&self) -> Duration {
        Duration::from_millis(self.family_load_timeout_ms)
    }
}

/// Reads an optional numeric variable, falling back when absent or malformed.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
