use serde::Serialize;
use warp::Filter;

use crate::config::Config;
use crate::map_surface::LngLat;

/// Settings the browser needs to create the map.
#[derive(Debug, Clone, Serialize)]
pub struct ClientConfig {
    pub api_key: String,
    pub center: LngLat,
    pub zoom: f64,
}

impl ClientConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.search.api_key.clone(),
            center: config.default_viewport.center,
            zoom: config.default_viewport.zoom,
        }
    }
}

pub fn build_config_routes(
    client_config: ClientConfig,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "config")
        .and(warp::get())
        .map(move || warp::reply::json(&client_config))
}
