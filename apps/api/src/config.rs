use anyhow::{Context, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Application configuration loaded from environment variables.
/// Only `PORT` needs to parse; everything else has a default or is optional.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// When unset the server falls back to the in-memory job store.
    pub database_url: Option<String>,
    /// When unset the AI-proxy routes serve canned fallback responses.
    pub gemini_api_key: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            database_url: optional_env("DATABASE_URL"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            database_url: None,
            gemini_api_key: None,
            rust_log: "info".to_string(),
        }
    }
}

/// Treats an unset or empty variable as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
