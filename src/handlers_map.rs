use serde::{Deserialize, Serialize};
use warp::{reject, Filter, Rejection, Reply};

use crate::app_state::AppState;
use crate::map_explorer::{CategoryState, ExplorerError, MapExplorer};
use crate::map_surface::{LngLat, RenderedMarker, Viewport};
use crate::tabs::Tab;
use crate::warp_helpers::{with_state, ValidationError, ViewInactiveError};

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewportRequest {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

#[derive(Debug, Serialize)]
pub struct MapStateResponse {
    pub categories: Vec<CategoryState>,
    pub viewport: Viewport,
    /// Searches started by the request that produced this reply.
    pub fetches_started: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkersResponse {
    pub markers: Vec<RenderedMarker>,
    pub total: usize,
}

fn map_inactive() -> Rejection {
    reject::custom(ViewInactiveError { required: Tab::Map })
}

fn map_state(explorer: &MapExplorer, fetches_started: usize) -> MapStateResponse {
    MapStateResponse {
        categories: explorer.categories(),
        viewport: explorer.viewport(),
        fetches_started,
    }
}

impl ViewportRequest {
    fn validate(&self) -> Result<Viewport, ValidationError> {
        let valid = self.lat.is_finite()
            && self.lon.is_finite()
            && self.zoom.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
            && self.zoom >= 0.0;

        if !valid {
            return Err(ValidationError {
                message: format!(
                    "Invalid viewport: lat {}, lon {}, zoom {}",
                    self.lat, self.lon, self.zoom
                ),
            });
        }

        Ok(Viewport {
            center: LngLat {
                lng: self.lon,
                lat: self.lat,
            },
            zoom: self.zoom,
        })
    }
}

pub async fn get_map_state(state: AppState) -> Result<impl Reply, Rejection> {
    let response = state
        .with_map(|explorer| map_state(explorer, 0))
        .ok_or_else(map_inactive)?;
    Ok(warp::reply::json(&response))
}

pub async fn toggle_category(
    request: ToggleRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let (plans, response) = state
        .with_map(|explorer| {
            explorer
                .toggle_category(&request.query)
                .map(|plans| {
                    let response = map_state(explorer, plans.len());
                    (plans, response)
                })
        })
        .ok_or_else(map_inactive)?
        .map_err(|e| match e {
            ExplorerError::UnknownCategory(_) => reject::custom(ValidationError {
                message: e.to_string(),
            }),
        })?;

    state.spawn_fetches(plans);
    Ok(warp::reply::json(&response))
}

pub async fn viewport_settled(
    request: ViewportRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let viewport = request.validate().map_err(reject::custom)?;

    let (plans, response) = state
        .with_map(|explorer| {
            let plans = explorer.viewport_settled(viewport);
            let response = map_state(explorer, plans.len());
            (plans, response)
        })
        .ok_or_else(map_inactive)?;

    state.spawn_fetches(plans);
    Ok(warp::reply::json(&response))
}

pub async fn list_markers(state: AppState) -> Result<impl Reply, Rejection> {
    let markers = state
        .with_map(|explorer| explorer.surface().markers())
        .ok_or_else(map_inactive)?;

    Ok(warp::reply::json(&MarkersResponse {
        total: markers.len(),
        markers,
    }))
}

pub fn build_map_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let api_map_state = warp::path!("api" / "map")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(get_map_state);

    let api_map_toggle = warp::path!("api" / "map" / "toggle")
        .and(warp::post())
        .and(warp::body::json::<ToggleRequest>())
        .and(with_state(state.clone()))
        .and_then(toggle_category);

    let api_map_viewport = warp::path!("api" / "map" / "viewport")
        .and(warp::put())
        .and(warp::body::json::<ViewportRequest>())
        .and(with_state(state.clone()))
        .and_then(viewport_settled);

    let api_map_markers = warp::path!("api" / "map" / "markers")
        .and(warp::get())
        .and(with_state(state))
        .and_then(list_markers);

    api_map_state
        .or(api_map_toggle)
        .or(api_map_viewport)
        .or(api_map_markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_validation() {
        let ok = ViewportRequest {
            lat: 12.97,
            lon: 77.59,
            zoom: 14.0,
        };
        let viewport = ok.validate().unwrap();
        assert_eq!(viewport.center.lng, 77.59);
        assert_eq!(viewport.zoom, 14.0);

        for (lat, lon, zoom) in [
            (91.0, 0.0, 10.0),
            (0.0, -181.0, 10.0),
            (0.0, 0.0, -1.0),
            (f64::NAN, 0.0, 10.0),
            (0.0, 0.0, f64::INFINITY),
        ] {
            assert!(ViewportRequest { lat, lon, zoom }.validate().is_err());
        }
    }
}
