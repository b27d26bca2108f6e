use anyhow::{Context, Result};

use crate::matching::ranking::DEFAULT_TOP_N;

pub const DEFAULT_JOBS_API_URL: &str = "https://remotive.com/api/remote-jobs";
pub const DEFAULT_EMBEDDING_API_URL: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Application configuration loaded from environment variables.
/// Every key has a default, so the dashboard starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub jobs_api_url: String,
    /// `None` keeps the HTTP client's default timeout.
    pub jobs_timeout_secs: Option<u64>,
    pub embedding_api_url: String,
    /// When unset the offline hashing embedder is used.
    pub embedding_api_key: Option<String>,
    pub embedding_model: String,
    pub top_n: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            jobs_api_url: DEFAULT_JOBS_API_URL.to_string(),
            jobs_timeout_secs: None,
            embedding_api_url: DEFAULT_EMBEDDING_API_URL.to_string(),
            embedding_api_key: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            top_n: DEFAULT_TOP_N,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            jobs_api_url: std::env::var("JOBS_API_URL").unwrap_or(defaults.jobs_api_url),
            jobs_timeout_secs: optional_env("JOBS_TIMEOUT_SECS")
                .map(|v| {
                    v.parse::<u64>()
                        .context("JOBS_TIMEOUT_SECS must be a whole number of seconds")
                })
                .transpose()?,
            embedding_api_url: std::env::var("EMBEDDING_API_URL")
                .unwrap_or(defaults.embedding_api_url),
            embedding_api_key: optional_env("EMBEDDING_API_KEY"),
            embedding_model: std::env::var("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            top_n: parse_env("TOP_N", defaults.top_n)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

/// Returns the variable's value, treating an empty string as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_remote_listing() {
        let config = Config::default();
        assert_eq!(config.jobs_api_url, DEFAULT_JOBS_API_URL);
        assert_eq!(config.top_n, 5);
        assert!(config.embedding_api_key.is_none());
        assert!(config.jobs_timeout_secs.is_none());
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: u16 = parse_env("DASHBOARD_TEST_UNSET_PORT_VARIABLE", 9090).unwrap();
        assert_eq!(value, 9090);
    }

    #[test]
    fn test_parse_env_rejects_malformed_value() {
        std::env::set_var("DASHBOARD_TEST_BAD_PORT_VARIABLE", "eighty");
        let err = parse_env::<u16>("DASHBOARD_TEST_BAD_PORT_VARIABLE", 8080).unwrap_err();
        std::env::remove_var("DASHBOARD_TEST_BAD_PORT_VARIABLE");

        let message = format!("{err:#}");
        assert!(message.contains("DASHBOARD_TEST_BAD_PORT_VARIABLE"), "{message}");
        assert!(message.contains("eighty"), "{message}");
    }

    // The only test that touches the real keys, so it cannot race another test.
    #[test]
    fn test_from_env_rejects_invalid_numbers() {
        for (key, raw) in [("PORT", "99999"), ("TOP_N", "-1"), ("JOBS_TIMEOUT_SECS", "soon")] {
            let previous = std::env::var(key).ok();
            std::env::set_var(key, raw);
            let result = Config::from_env();
            match previous {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }

            let err = result.expect_err(key);
            assert!(format!("{err:#}").contains(key), "{key}: {err:#}");
        }
    }
}
