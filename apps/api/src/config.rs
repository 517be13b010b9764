use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Session cache backend. Falls back to the in-process store when unset.
    pub redis_url: Option<String>,
    pub gemini_api_key: String,
    /// Web API key used for Firebase ID token lookups.
    pub firebase_api_key: String,
    pub cors_origins: Vec<String>,
    pub session_ttl_secs: u64,
    pub ai_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: optional_env("REDIS_URL"),
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            firebase_api_key: require_env("FIREBASE_API_KEY")?,
            cors_origins: parse_origins(&std::env::var("CORS_ORIGINS").unwrap_or_default()),
            session_ttl_secs: parse_env_or("SESSION_TTL_SECS", 3600)?,
            ai_timeout_secs: parse_env_or("AI_TIMEOUT_SECS", 120)?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env_or(key: &str, default: u64) -> Result<u64> {
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a non-negative integer")),
        None => Ok(default),
    }
}

/// Splits a comma-separated allow-list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
