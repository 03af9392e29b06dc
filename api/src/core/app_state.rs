use rag_gateway::{RagGateway, RagGatewayConfig};

use crate::error_handler::AppError;

/// Default bind address when `API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:3000";

/// Process-wide proxy configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Socket address to bind, e.g. `127.0.0.1:3000`.
    pub address: String,
    /// Where questions get forwarded.
    pub gateway: RagGatewayConfig,
}

impl ApiConfig {
    /// Load from `API_ADDRESS` and `RAG_API_URL`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = lookup("API_ADDRESS")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());
        let gateway = RagGatewayConfig::from_lookup(&lookup)?;
        Ok(Self { address, gateway })
    }
}

/// Shared state for all HTTP handlers. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub gateway: RagGateway,
}

impl AppState {
    /// Builds the outbound client from the config.
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let gateway = RagGateway::new(config.gateway.clone())?;
        Ok(Self { config, gateway })
    }
}
