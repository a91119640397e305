use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;

use crate::categories::{self, Category, CATEGORIES};
use crate::map_surface::{MapSurface, MarkerId, MarkerLayer, Viewport};
use crate::pipeline::{marker_for, radius_for_zoom, select_places};
use crate::poi::{PoiResult, SearchRequest};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExplorerError {
    #[error("Unknown category query: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerSettings {
    pub default_viewport: Viewport,
    pub result_limit: u32,
    pub max_markers: usize,
}

/// A search the explorer wants issued for a category with no markers yet.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    pub mount_id: u64,
    pub color: &'static str,
    pub request: SearchRequest,
}

impl FetchPlan {
    pub fn query(&self) -> &str {
        &self.request.query
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryState {
    #[serde(flatten)]
    pub category: Category,
    pub selected: bool,
    pub marker_count: usize,
}

/// Map view state: selected category filters and the markers drawn for each.
pub struct MapExplorer<S: MapSurface = MarkerLayer> {
    mount_id: u64,
    surface: S,
    settings: ExplorerSettings,
    selected: Vec<String>,
    markers_by_query: HashMap<String, Vec<MarkerId>>,
}

impl MapExplorer<MarkerLayer> {
    pub fn mount(mount_id: u64, settings: ExplorerSettings) -> Self {
        Self::new(mount_id, MarkerLayer::new(settings.default_viewport), settings)
    }
}

impl<S: MapSurface> MapExplorer<S> {
    pub fn new(mount_id: u64, surface: S, settings: ExplorerSettings) -> Self {
        Self {
            mount_id,
            surface,
            settings,
            selected: Vec::new(),
            markers_by_query: HashMap::new(),
        }
    }

    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    pub fn selected_queries(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, query: &str) -> bool {
        self.selected.iter().any(|q| q == query)
    }

    pub fn markers_for(&self, query: &str) -> Option<&[MarkerId]> {
        self.markers_by_query.get(query).map(Vec::as_slice)
    }

    pub fn categories(&self) -> Vec<CategoryState> {
        CATEGORIES
            .iter()
            .map(|category| CategoryState {
                category: *category,
                selected: self.is_selected(category.query),
                marker_count: self.markers_for(category.query).map_or(0, <[_]>::len),
            })
            .collect()
    }

    /// Flips a category filter and reconciles. Deselecting clears the
    /// category's markers right away.
    pub fn toggle_category(&mut self, query: &str) -> Result<Vec<FetchPlan>, ExplorerError> {
        let category = categories::find_by_query(query)
            .ok_or_else(|| ExplorerError::UnknownCategory(query.to_string()))?;

        if let Some(pos) = self.selected.iter().position(|q| q == category.query) {
            self.selected.remove(pos);
            self.release(category.query);
            info!("Category '{}' deselected", category.name);
        } else {
            self.selected.push(category.query.to_string());
            info!("Category '{}' selected", category.name);
        }

        Ok(self.reconcile())
    }

    /// Called once the map stops moving.
    pub fn viewport_settled(&mut self, viewport: Viewport) -> Vec<FetchPlan> {
        self.surface.set_viewport(viewport);
        debug!(
            "Viewport settled at {},{} zoom {}",
            viewport.center.lat, viewport.center.lng, viewport.zoom
        );
        self.reconcile()
    }

    /// Drops markers of deselected categories and plans a fetch for every
    /// selected category that has none.
    pub fn reconcile(&mut self) -> Vec<FetchPlan> {
        self.release_deselected();

        let viewport = self.surface.viewport();
        let radius = radius_for_zoom(viewport.zoom);

        self.selected
            .iter()
            .filter(|q| !self.markers_by_query.contains_key(q.as_str()))
            .filter_map(|q| categories::find_by_query(q))
            .map(|category| FetchPlan {
                mount_id: self.mount_id,
                color: category.color,
                request: SearchRequest {
                    query: category.query.to_string(),
                    center: viewport.center,
                    radius,
                    limit: self.settings.result_limit,
                },
            })
            .collect()
    }

    /// Installs the markers for a completed fetch and returns how many remain
    /// displayed for that category.
    pub fn apply_results(&mut self, plan: &FetchPlan, results: Vec<PoiResult>) -> usize {
        let query = plan.query();
        let received = results.len();
        let places = select_places(query, results, self.settings.max_markers);

        let markers: Vec<MarkerId> = places
            .iter()
            .filter_map(|place| marker_for(place, plan.color))
            .map(|spec| self.surface.add_marker(spec))
            .collect();

        debug!(
            "Query '{}': {} results, {} markers placed",
            query,
            received,
            markers.len()
        );

        if let Some(replaced) = self.markers_by_query.insert(query.to_string(), markers) {
            for id in replaced {
                self.surface.remove_marker(id);
            }
        }

        // A response can land after its category was deselected
        self.release_deselected();

        self.markers_for(query).map_or(0, <[_]>::len)
    }

    /// Removes every marker and destroys the map.
    pub fn teardown(&mut self) {
        let queries: Vec<String> = self.markers_by_query.keys().cloned().collect();
        for query in queries {
            self.release(&query);
        }
        self.surface.destroy();
        info!("Map view torn down");
    }

    fn release_deselected(&mut self) {
        let stale: Vec<String> = self
            .markers_by_query
            .keys()
            .filter(|q| !self.is_selected(q))
            .cloned()
            .collect();

        for query in stale {
            self.release(&query);
        }
    }

    fn release(&mut self, query: &str) {
        if let Some(markers) = self.markers_by_query.remove(query) {
            debug!("Releasing {} markers for '{}'", markers.len(), query);
            for id in markers {
                self.surface.remove_marker(id);
            }
        }
    }
}
