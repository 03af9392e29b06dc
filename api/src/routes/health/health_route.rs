use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{core::app_state::AppState, routes::health::health_response::HealthResponse};

/// Handler: GET /health
///
/// The proxy is up if this answers at all; upstream reachability is reported
/// alongside but never turns into an error status.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let upstream = state.gateway.health().await;
    Json(HealthResponse {
        status: "ok",
        upstream,
    })
}
