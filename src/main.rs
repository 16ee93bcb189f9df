//! HTTP server entry point.
//!
//! Environment:
//! - `HR_COST_CONFIG_DIR`: configuration directory (default `./config/default`)
//! - `HR_COST_BIND`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `hr_cost_engine=info`)

use std::env;

use hr_cost_engine::api::{AppState, create_router};
use hr_cost_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hr_cost_engine=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_dir = env::var("HR_COST_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let loader = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        name = %loader.metadata().name,
        version = %loader.metadata().version,
        allowance_types = loader.config().allowance_types().len(),
        "Configuration loaded"
    );

    let bind = env::var("HR_COST_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(address = %bind, "Listening");

    axum::serve(listener, create_router(AppState::new(loader.into_config()))).await?;
    Ok(())
}
