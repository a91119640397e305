use log::{error, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::comment_browser::CommentBrowser;
use crate::map_explorer::{ExplorerSettings, FetchPlan, MapExplorer};
use crate::poi::{PoiResult, PoiSource, SearchResult};
use crate::tabs::TabController;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    tabs: Arc<Mutex<TabController>>,
    source: Arc<dyn PoiSource>,
}

impl AppState {
    pub fn new(settings: ExplorerSettings, source: Arc<dyn PoiSource>) -> Self {
        Self {
            tabs: Arc::new(Mutex::new(TabController::new(settings))),
            source,
        }
    }

    /// Never held across an await.
    pub fn lock(&self) -> MutexGuard<'_, TabController> {
        self.tabs.lock().unwrap_or_else(|poisoned| {
            warn!("State lock was poisoned, continuing with inner state");
            poisoned.into_inner()
        })
    }

    /// Runs `f` against the map explorer, or returns `None` when the map view
    /// is not mounted.
    pub fn with_map<T>(&self, f: impl FnOnce(&mut MapExplorer) -> T) -> Option<T> {
        self.lock().map_mut().map(f)
    }

    pub fn with_comments<T>(&self, f: impl FnOnce(&mut CommentBrowser) -> T) -> Option<T> {
        self.lock().comments_mut().map(f)
    }

    /// Runs each planned search as its own task. The returned handles are
    /// only awaited by tests; the pipeline does not depend on them.
    pub fn spawn_fetches(&self, plans: Vec<FetchPlan>) -> Vec<JoinHandle<()>> {
        plans
            .into_iter()
            .map(|plan| {
                let state = self.clone();
                tokio::spawn(async move {
                    let outcome = state.source.search(&plan.request).await;
                    state.complete_fetch(&plan, outcome);
                })
            })
            .collect()
    }

    pub fn complete_fetch(&self, plan: &FetchPlan, outcome: SearchResult<Vec<PoiResult>>) {
        let results = match outcome {
            Ok(results) => results,
            Err(e) => {
                error!("Error fetching POIs for '{}': {}", plan.query(), e);
                return;
            }
        };

        let mut tabs = self.lock();
        match tabs.map_mut() {
            Some(explorer) if explorer.mount_id() == plan.mount_id => {
                explorer.apply_results(plan, results);
            }
            _ => {
                log::debug!(
                    "Dropping results for '{}': map view no longer mounted",
                    plan.query()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_surface::{LngLat, Viewport};
    use crate::poi::{Address, PoiDetails, Position, SearchError, SearchRequest};
    use crate::tabs::Tab;
    use async_trait::async_trait;

    struct FixedSource;

    #[async_trait]
    impl PoiSource for FixedSource {
        async fn search(&self, request: &SearchRequest) -> SearchResult<Vec<PoiResult>> {
            if request.query == "museum" {
                return Err(SearchError::Task("connection reset".to_string()));
            }
            Ok((0..3)
                .map(|i| PoiResult {
                    poi: Some(PoiDetails {
                        name: Some(format!("{} {}", request.query, i)),
                        categories: vec![request.query.clone()],
                        ..Default::default()
                    }),
                    address: Some(Address {
                        freeform_address: Some("Church Street".to_string()),
                    }),
                    position: Some(Position { lat: 12.9, lon: 77.6 }),
                })
                .collect())
        }
    }

    fn state() -> AppState {
        AppState::new(
            ExplorerSettings {
                default_viewport: Viewport {
                    center: LngLat {
                        lng: 77.5946,
                        lat: 12.9716,
                    },
                    zoom: 12.0,
                },
                result_limit: 20,
                max_markers: 8,
            },
            Arc::new(FixedSource),
        )
    }

    async fn toggle(state: &AppState, query: &str) {
        let plans = state
            .lock()
            .map_mut()
            .unwrap()
            .toggle_category(query)
            .unwrap();
        for handle in state.spawn_fetches(plans) {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated() {
        let state = state();
        toggle(&state, "temple").await;
        toggle(&state, "museum").await;

        let tabs = state.lock();
        let explorer = tabs.map().unwrap();
        assert_eq!(explorer.markers_for("temple").map(<[_]>::len), Some(3));
        assert!(explorer.markers_for("museum").is_none());
        assert!(explorer.is_selected("museum"));
        assert_eq!(explorer.surface().marker_count(), 3);
    }

    #[tokio::test]
    async fn test_results_after_unmount_are_dropped() {
        let state = state();
        let plans = state
            .lock()
            .map_mut()
            .unwrap()
            .toggle_category("temple")
            .unwrap();

        state.lock().select_tab(Tab::Comments);
        state.lock().select_tab(Tab::Map);

        for handle in state.spawn_fetches(plans) {
            handle.await.unwrap();
        }

        let tabs = state.lock();
        assert_eq!(tabs.map().unwrap().surface().marker_count(), 0);
    }
}
