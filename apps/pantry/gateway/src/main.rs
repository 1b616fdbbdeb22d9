use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use pantry_gateway::{ProxyState, config::Config};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = ProxyState::new(config.upstream.base_url.clone())?;
    info!(upstream = %state.base_url(), "Forwarding to Items Service");

    let router = pantry_gateway::build_router(state);

    create_production_app(router, &config.server, Duration::from_secs(30), async {})
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Pantry gateway shutdown complete");
    Ok(())
}
