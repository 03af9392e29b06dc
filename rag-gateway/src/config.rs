//! Gateway configuration loaded once from the environment.
//!
//! # Environment variables
//! - `RAG_API_URL` = base URL of the external RAG service
//!   (default `http://localhost:8000`)
//!
//! The value is resolved at startup and then passed around by value; request
//! handlers never consult the environment.

use crate::error::{ConfigError, validate_http_endpoint};

/// Default base URL when `RAG_API_URL` is unset or empty.
pub const DEFAULT_RAG_API_URL: &str = "http://localhost:8000";

/// Route appended to the base URL for chat forwarding.
pub const CHAT_ROUTE: &str = "/chat";

/// Route appended to the base URL for the health probe.
pub const HEALTH_ROUTE: &str = "/health";

/// Configuration of the outbound side of the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagGatewayConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8000`.
    pub base_url: String,
}

impl RagGatewayConfig {
    /// Builds a config from an explicit base URL.
    ///
    /// # Errors
    /// [`ConfigError::InvalidFormat`] if the URL has no http/https scheme.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        validate_http_endpoint("RAG_API_URL", &base_url)?;
        Ok(Self { base_url })
    }

    /// Reads `RAG_API_URL` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("RAG_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RAG_API_URL.to_string());
        Self::new(url)
    }

    /// Full URL of the chat route.
    pub fn chat_url(&self) -> String {
        format!("{}{CHAT_ROUTE}", self.base_url)
    }

    /// Full URL of the health route.
    pub fn health_url(&self) -> String {
        format!("{}{HEALTH_ROUTE}", self.base_url)
    }
}
