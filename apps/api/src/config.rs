use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;
const MIN_API_KEY_CHARS: usize = 20;
const PLACEHOLDER_MARKERS: &[&str] = &["your_", "your-", "changeme", "placeholder"];

/// Application configuration loaded from environment variables.
/// Every provider key is optional; with none set the service runs on fallback extraction.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub provider_timeout: Duration,
    pub vocabulary_path: Option<PathBuf>,
    /// Key variables that were set but rejected as placeholders.
    pub rejected_keys: Vec<&'static str>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut rejected_keys = Vec::new();
        Ok(Config {
            anthropic_api_key: api_key("ANTHROPIC_API_KEY", "sk-ant-", &mut rejected_keys),
            openai_api_key: api_key("OPENAI_API_KEY", "sk-", &mut rejected_keys),
            provider_timeout: Duration::from_secs(
                optional_env("PROVIDER_TIMEOUT_SECS")
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?
                    .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
            ),
            vocabulary_path: optional_env("VOCABULARY_PATH").map(PathBuf::from),
            rejected_keys,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads an API key, treating placeholders and implausible values as unset.
fn api_key(
    key: &'static str,
    expected_prefix: &str,
    rejected: &mut Vec<&'static str>,
) -> Option<String> {
    let value = optional_env(key)?;
    if plausible_api_key(&value, expected_prefix) {
        Some(value)
    } else {
        rejected.push(key);
        None
    }
}

fn plausible_api_key(value: &str, expected_prefix: &str) -> bool {
    let lower = value.to_lowercase();
    value.starts_with(expected_prefix)
        && value.len() > MIN_API_KEY_CHARS
        && !PLACEHOLDER_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plausible_api_key() {
        assert!(plausible_api_key("sk-proj-abcdefghijklmnopqrstuvwxyz", "sk-"));
        assert!(!plausible_api_key("sk-short", "sk-"));
        assert!(!plausible_api_key("sk-your_openai_api_key_here", "sk-"));
        assert!(!plausible_api_key("abcdefghijklmnopqrstuvwxyz123", "sk-"));
        assert!(plausible_api_key(
            "sk-ant-REDACTED",
            "sk-ant-"
        ));
    }
}
