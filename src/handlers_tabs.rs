use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use warp::{Filter, Reply};

use crate::app_state::AppState;
use crate::tabs::Tab;
use crate::warp_helpers::with_state;

#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: Tab,
}

#[derive(Debug, Serialize)]
pub struct TabResponse {
    pub tab: Tab,
    pub changed: bool,
}

pub async fn get_tab(state: AppState) -> Result<impl Reply, Infallible> {
    let tab = state.lock().active_tab();
    Ok(warp::reply::json(&TabResponse {
        tab,
        changed: false,
    }))
}

pub async fn select_tab(request: SelectTabRequest, state: AppState) -> Result<impl Reply, Infallible> {
    let changed = state.lock().select_tab(request.tab);
    Ok(warp::reply::json(&TabResponse {
        tab: request.tab,
        changed,
    }))
}

/// Called by the page on load so a reload starts from a clean state.
pub async fn reset_tabs(state: AppState) -> Result<impl Reply, Infallible> {
    let tab = state.lock().reset();
    Ok(warp::reply::json(&TabResponse { tab, changed: true }))
}

pub fn build_tab_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let get = warp::path!("api" / "tab")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(get_tab);

    let put = warp::path!("api" / "tab")
        .and(warp::put())
        .and(warp::body::json::<SelectTabRequest>())
        .and(with_state(state.clone()))
        .and_then(select_tab);

    let reset = warp::path!("api" / "tab" / "reset")
        .and(warp::post())
        .and(with_state(state))
        .and_then(reset_tabs);

    get.or(put).or(reset)
}
