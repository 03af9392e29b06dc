use rag_gateway::HealthStatus;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the proxy itself answers.
    pub status: &'static str,
    pub upstream: HealthStatus,
}
