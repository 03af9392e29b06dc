//! POST /api/rag — forwards a chat question to the external RAG service.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
};
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::rag::rag_request::ProxyChatRequest,
};

/// Handler: POST /api/rag
///
/// Relays the upstream JSON verbatim on success. Any forwarding failure
/// collapses into `500 { "error": <message> }`; nothing is retried.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/rag \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is the DMA metric?","top_k":6,"where":{"dma":"Boston"}}'
/// ```
pub async fn rag_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let upstream = ProxyChatRequest::from_body(&body)?.into_upstream();

    debug!(
        request_id = %request_id,
        top_k = %upstream.top_k,
        has_question = upstream.question.is_some(),
        "rag_route: forwarding"
    );

    match state.gateway.forward_chat(&upstream).await {
        Ok(data) => {
            debug!(request_id = %request_id, "rag_route: success");
            Ok(Json(data))
        }
        Err(err) => {
            error!(
                request_id = %request_id,
                error = %err,
                "rag_route: forwarding failed"
            );
            Err(AppError::from(err))
        }
    }
}

/// Fallback for every method other than POST on the proxy route.
pub async fn method_not_allowed(method: Method) -> AppError {
    debug!(%method, "rag_route: method not allowed");
    AppError::MethodNotAllowed
}
