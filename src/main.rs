use std::error::Error;

use api::ApiConfig;
use rag_gateway::telemetry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file if present.
    // Every variable has a default, so a missing file is fine.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }

    tracing_subscriber::registry()
        .with(telemetry::env_filter())
        .with(telemetry::layer())
        .init();

    let config = ApiConfig::from_env()?;
    api::start(config).await?;

    Ok(())
}
