//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,

    /// JSON rules catalog loaded at startup
    pub content_path: String,
    /// SQLite URL for the assistant settings store
    pub settings_db_url: String,

    /// Chat provider base URLs
    pub openai_base_url: String,
    pub anthropic_base_url: String,
    pub gemini_base_url: String,

    /// OpenAI-images-compatible endpoint for portraits
    pub image_gen_base_url: String,
    pub image_gen_model: String,
    /// Credential for the image endpoint; portraits fail visibly without it
    pub image_gen_api_key: Option<String>,

    /// Wizard session limits
    pub sessions: SessionConfig,
}

/// Limits for in-memory wizard sessions
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Most live sessions; creating one more evicts the least recently active
    pub max_sessions: usize,
    /// Sessions unchanged for this long are removed by the cleanup worker
    pub idle_timeout_minutes: u32,
    /// How often the cleanup worker runs
    pub cleanup_interval_secs: u64,
    /// Transcript entries kept per session
    pub max_chat_history: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            idle_timeout_minutes: 120,
            cleanup_interval_secs: 300,
            max_chat_history: 200,
        }
    }
}

impl SessionConfig {
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            max_sessions: parse_or("HEROBUILDER_MAX_SESSIONS", defaults.max_sessions)?,
            idle_timeout_minutes: parse_or(
                "HEROBUILDER_SESSION_IDLE_MINUTES",
                defaults.idle_timeout_minutes,
            )?,
            cleanup_interval_secs: parse_or(
                "HEROBUILDER_SESSION_CLEANUP_SECS",
                defaults.cleanup_interval_secs,
            )?,
            max_chat_history: parse_or("HEROBUILDER_CHAT_HISTORY", defaults.max_chat_history)?,
        })
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset
fn parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a non-negative integer", name)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            content_path: env::var("HEROBUILDER_CONTENT_PATH")
                .unwrap_or_else(|_| "data/catalog.json".to_string()),
            settings_db_url: env::var("HEROBUILDER_SETTINGS_DB")
                .unwrap_or_else(|_| "sqlite://herobuilder.db?mode=rwc".to_string()),

            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            anthropic_base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),

            image_gen_base_url: env::var("IMAGE_GEN_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            image_gen_model: env::var("IMAGE_GEN_MODEL")
                .unwrap_or_else(|_| "dall-e-3".to_string()),
            image_gen_api_key: env::var("IMAGE_GEN_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),

            sessions: SessionConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back_when_unset() {
        let value: usize = parse_or("HEROBUILDER_TEST_UNSET_LIMIT", 7).expect("default");
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_or_reads_and_validates() {
        env::set_var("HEROBUILDER_TEST_SESSION_LIMIT", " 25 ");
        let value: usize = parse_or("HEROBUILDER_TEST_SESSION_LIMIT", 7).expect("parsed");
        assert_eq!(value, 25);

        env::set_var("HEROBUILDER_TEST_BAD_LIMIT", "-3");
        assert!(parse_or::<usize>("HEROBUILDER_TEST_BAD_LIMIT", 7).is_err());
    }
}
