use anyhow::{Context, Result};

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub port: u16,
    pub rust_log: String,
    /// Accepted analyze requests per client address per window.
    pub rate_limit_per_window: u32,
    pub rate_limit_window_secs: u64,
    /// Key the limiter on X-Forwarded-For / X-Real-IP instead of the peer address.
    pub trust_proxy_headers: bool,
    pub llm_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            gemini_model: std::env::var("GEMINI_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            rate_limit_per_window: parse_env("RATE_LIMIT_PER_WINDOW", 5)?,
            rate_limit_window_secs: parse_env("RATE_LIMIT_WINDOW_SECS", 3600)?,
            trust_proxy_headers: parse_env("TRUST_PROXY_HEADERS", false)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by in-process router tests.
    pub fn for_tests() -> Self {
        Config {
            google_api_key: "test-api-key-12345".to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            rate_limit_per_window: 5,
            rate_limit_window_secs: 3600,
            trust_proxy_headers: false,
            llm_timeout_secs: 5,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}
