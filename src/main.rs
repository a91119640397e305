use log::{error, info, warn};
use std::net::{IpAddr, TcpListener};
use std::sync::Arc;

use travel_explorer::app_state::AppState;
use travel_explorer::config::Config;
use travel_explorer::handlers_config::ClientConfig;
use travel_explorer::poi::TomTomClient;
use travel_explorer::routes::build_routes;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let host: IpAddr = config.host.parse()?;
    let port = config.port;

    info!("Starting Travel Explorer on {}:{}", host, port);
    info!("POI search endpoint: {}", config.search.base_url);
    info!(
        "Default view: {},{} zoom {}",
        config.default_viewport.center.lat,
        config.default_viewport.center.lng,
        config.default_viewport.zoom
    );

    if config.search.api_key.is_empty() {
        warn!("TRAVEL_EXPLORER_TOMTOM_API_KEY is not set, POI searches will be rejected upstream");
    }

    // Check if port is available BEFORE initializing services
    if !is_port_available(host, port) {
        error!(
            "Port {} is already in use. Please stop any existing Travel Explorer instances or use a different port.",
            port
        );
        return Err(format!("Port {} is already in use", port).into());
    }

    let source = Arc::new(TomTomClient::new(
        config.search.base_url.clone(),
        config.search.api_key.clone(),
        config.search.request_timeout,
    ));
    let state = AppState::new(config.explorer_settings(), source);

    let routes = build_routes(state, ClientConfig::from_config(&config));

    info!(
        "Server started successfully, listening on http://localhost:{}",
        port
    );

    warp::serve(routes)
        .run((host, port))
        .await;

    Ok(())
}

fn is_port_available(host: IpAddr, port: u16) -> bool {
    TcpListener::bind((host, port)).is_ok()
}
