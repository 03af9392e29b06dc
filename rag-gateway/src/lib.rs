//! Forwarding client for the external RAG chat service.
//!
//! The proxy never retrieves or generates anything itself. This crate owns the
//! outbound half of the contract:
//! - [`RagGatewayConfig`] resolves the base URL once at startup,
//! - [`RagChatRequest`] is the body posted to `<base_url>/chat`,
//! - [`RagGateway`] performs the forward and an optional health probe,
//! - [`telemetry`] holds the log filter defaults and the per-forward span.

pub mod config;
pub mod error;
pub mod gateway;
pub mod request;
pub mod telemetry;

pub use config::RagGatewayConfig;
pub use error::{ConfigError, GatewayError, Result};
pub use gateway::{HealthStatus, RagGateway};
pub use request::{DEFAULT_TOP_K, RagChatRequest};
