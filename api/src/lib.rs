use std::sync::Arc;

mod core;
mod error_handler;
mod routes;

pub use crate::core::app_state::{ApiConfig, AppState};
pub use crate::error_handler::{AppError, AppResult};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::{
    health::health_route::health_route,
    rag::rag_route::{method_not_allowed, rag_route},
};

/// Path the chat client posts questions to.
pub const PROXY_ROUTE: &str = "/api/rag";

/// Builds the HTTP router around an already constructed state.
///
/// Kept separate from [`start`] so tests can drive it without a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(PROXY_ROUTE, post(rag_route).fallback(method_not_allowed))
        .route("/health", get(health_route))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Binds `config.address` and serves until Ctrl+C.
pub async fn start(config: ApiConfig) -> Result<(), AppError> {
    let address = config.address.clone();
    let state = Arc::new(AppState::new(config)?);
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| AppError::Bind {
            addr: address.clone(),
            source,
        })?;

    info!(
        %address,
        upstream = %state.gateway.config().chat_url(),
        "RAG proxy listening on {PROXY_ROUTE}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("RAG proxy stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        // Without a signal handler the server keeps running until killed.
        std::future::pending::<()>().await;
    }
}
