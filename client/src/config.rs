//! Application configuration
//!
//! Centralized configuration with environment variable support and
//! sensible defaults.

use crate::error::ClientError;
use reqwest::Url;
use std::env;

/// Default backend origin
pub const DEFAULT_BASE_URL: &str = "http://localhost:3141";

/// Default user identifier sent with every exchange
pub const DEFAULT_USER_ID: &str = "default-user";

/// Default window and header title
pub const DEFAULT_TITLE: &str = "Agent Chat";

/// Default greeting seeded into a new conversation
pub const DEFAULT_GREETING: &str = "Hello! How can I help you today?";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Chat screen configuration
    pub chat: ChatConfig,
}

/// Backend API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin of the agent backend, e.g. `http://localhost:3141`
    pub base_url: String,
    /// Fixed user identifier sent in every exchange's options
    pub user_id: String,
}

/// Chat screen configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Window and header title
    pub title: String,
    /// Greeting seeded at session start; `None` disables it
    pub greeting: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                user_id: DEFAULT_USER_ID.to_string(),
            },
            chat: ChatConfig {
                title: DEFAULT_TITLE.to_string(),
                greeting: Some(DEFAULT_GREETING.to_string()),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig {
                base_url: env::var("AGENT_API_BASE_URL")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                user_id: env::var("AGENT_CHAT_USER_ID")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            },
            chat: ChatConfig {
                title: env::var("AGENT_CHAT_TITLE")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                // Set but empty means "no greeting"
                greeting: match env::var("AGENT_CHAT_GREETING") {
                    Ok(v) if v.trim().is_empty() => None,
                    Ok(v) => Some(v),
                    Err(_) => Some(DEFAULT_GREETING.to_string()),
                },
            },
        }
    }
}

impl ApiConfig {
    /// Parse and validate the base URL
    ///
    /// Only `http` and `https` origins are accepted.
    pub fn parsed_base_url(&self) -> Result<Url, ClientError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|e| ClientError::Config(format!("base URL {:?}: {}", self.base_url, e)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ClientError::Config(format!(
                    "base URL scheme must be http or https, got {:?}",
                    other
                )))
            }
        }

        if url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL {:?} cannot be a base",
                self.base_url
            )));
        }

        Ok(url)
    }
}
