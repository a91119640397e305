use std::convert::Infallible;
use warp::{Filter, Reply};

use crate::app_state::AppState;
use crate::handlers_comments::build_comment_routes;
use crate::handlers_config::{build_config_routes, ClientConfig};
use crate::handlers_health::build_health_routes;
use crate::handlers_map::build_map_routes;
use crate::handlers_static::build_static_routes;
use crate::handlers_tabs::build_tab_routes;
use crate::warp_helpers::{cors, handle_rejection};

/// The whole HTTP surface. Static files come last so API paths win.
pub fn build_routes(
    state: AppState,
    client_config: ClientConfig,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    build_health_routes()
        .or(build_config_routes(client_config))
        .or(build_tab_routes(state.clone()))
        .or(build_map_routes(state.clone()))
        .or(build_comment_routes(state))
        .or(build_static_routes())
        .with(cors())
        .with(warp::log("travel_explorer"))
        .recover(handle_rejection)
}
