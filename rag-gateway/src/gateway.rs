//! Thin client for the external RAG service.
//!
//! - `POST {base_url}/chat`   — forwards a question, returns the JSON body as-is
//! - `GET  {base_url}/health` — best-effort reachability probe
//!
//! Construct once at startup and share behind an `Arc`; the inner
//! `reqwest::Client` pools connections across requests.

use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::{Instrument, Span, debug, error, warn};

use crate::config::RagGatewayConfig;
use crate::error::{GatewayError, Result, make_snippet};
use crate::request::RagChatRequest;
use crate::telemetry;

/// A serializable health snapshot of the upstream service.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Probed URL.
    pub endpoint: String,
    /// Whether the upstream answered with a 2xx status.
    pub ok: bool,
    /// Round trip in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

/// Forwarder bound to one configured base URL.
#[derive(Debug, Clone)]
pub struct RagGateway {
    client: reqwest::Client,
    cfg: RagGatewayConfig,
    url_chat: String,
}

impl RagGateway {
    /// Creates a gateway for the given config.
    ///
    /// No client-side timeout is set: a hung upstream stalls only the request
    /// that is waiting on it, until the transport gives up.
    ///
    /// # Errors
    /// [`GatewayError::Transport`] if the HTTP client cannot be built.
    pub fn new(cfg: RagGatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let url_chat = cfg.chat_url();
        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// The config this gateway was built from.
    pub fn config(&self) -> &RagGatewayConfig {
        &self.cfg
    }

    /// Posts `req` to the chat route and returns the upstream JSON verbatim.
    ///
    /// A non-2xx status is not an error here: whatever JSON the upstream
    /// produced is relayed, only a warning is logged.
    ///
    /// # Errors
    /// - [`GatewayError::Transport`] on connection/IO failures
    /// - [`GatewayError::Decode`] if the body is not valid JSON
    pub async fn forward_chat(&self, req: &RagChatRequest) -> Result<Value> {
        let span = telemetry::forward_span(&self.url_chat, &req.top_k);
        self.post_chat(req).instrument(span).await
    }

    async fn post_chat(&self, req: &RagChatRequest) -> Result<Value> {
        debug!("POST {}", self.url_chat);
        let start = Instant::now();

        let resp = self
            .client
            .post(&self.url_chat)
            .json(req)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "forwarding to RAG service failed");
                GatewayError::from(e)
            })?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        let latency_ms = start.elapsed().as_millis();

        let span = Span::current();
        span.record("status", status.as_u16());
        span.record("latency_ms", latency_ms as u64);

        if !status.is_success() {
            warn!(
                %status,
                latency_ms,
                snippet = %make_snippet(&String::from_utf8_lossy(&bytes)),
                "RAG service returned non-success status; relaying body"
            );
        }

        let body = serde_json::from_slice::<Value>(&bytes).map_err(|e| {
            let reason = format!(
                "{e}; body: {}",
                make_snippet(&String::from_utf8_lossy(&bytes))
            );
            error!(%status, %reason, "RAG service returned a non-JSON body");
            GatewayError::Decode {
                url: self.url_chat.clone(),
                reason,
            }
        })?;

        debug!(%status, latency_ms, "RAG response relayed");
        Ok(body)
    }

    /// Probes `GET {base_url}/health`.
    ///
    /// This method never fails: any error is folded into `ok = false`.
    pub async fn health(&self) -> HealthStatus {
        let endpoint = self.cfg.health_url();
        let start = Instant::now();

        let outcome = self.client.get(&endpoint).send().await;
        let latency_ms = start.elapsed().as_millis();

        let (ok, message) = match outcome {
            Ok(resp) if resp.status().is_success() => (true, "RAG service is reachable".to_string()),
            Ok(resp) => (false, format!("RAG service answered HTTP {}", resp.status())),
            Err(e) => (false, format!("RAG service unreachable: {e}")),
        };

        if ok {
            debug!(%endpoint, latency_ms, "health probe completed");
        } else {
            warn!(%endpoint, latency_ms, %message, "health probe failed");
        }

        HealthStatus {
            endpoint,
            ok,
            latency_ms,
            message,
        }
    }
}
