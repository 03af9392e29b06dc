use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    error::WidgetError,
    wire::{AssistantReply, ChatRequest, ChatResponse},
};

/// Route on the proxy that accepts chat questions.
pub const PROXY_CHAT_PATH: &str = "/api/rag";

/// Carries one question to the proxy and back.
#[async_trait]
pub trait ProxyTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<AssistantReply, WidgetError>;
}

/// reqwest-backed transport posting JSON to `<proxy_url>/api/rag`.
#[derive(Debug, Clone)]
pub struct HttpProxyTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpProxyTransport {
    pub fn new(proxy_url: &str) -> Result<Self, WidgetError> {
        let client = reqwest::Client::builder().build()?;
        let url = format!("{}{PROXY_CHAT_PATH}", proxy_url.trim().trim_end_matches('/'));
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProxyTransport for HttpProxyTransport {
    #[instrument(skip_all, fields(url = %self.url))]
    async fn send(&self, request: &ChatRequest) -> Result<AssistantReply, WidgetError> {
        debug!("POST {}", self.url);
        let resp = self.client.post(&self.url).json(request).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            // Proxy errors look like `{ "error": "..." }`.
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP {status}"));
            warn!(%status, %message, "proxy returned an error");
            return Err(WidgetError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse =
            serde_json::from_slice(&bytes).map_err(|e| WidgetError::Decode(e.to_string()))?;
        body.into_reply()
    }
}
