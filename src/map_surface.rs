use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geographic point, longitude first like the map SDK.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LngLat,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub u64);

/// Everything needed to draw one marker and its info popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: LngLat,
    pub color: String,
    pub popup_html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMarker {
    pub id: MarkerId,
    #[serde(flatten)]
    pub spec: MarkerSpec,
}

/// The slice of the map SDK the explorer drives.
pub trait MapSurface: Send {
    fn viewport(&self) -> Viewport;
    fn set_viewport(&mut self, viewport: Viewport);
    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerId;
    /// Removing an unknown or already removed marker is a no-op.
    fn remove_marker(&mut self, id: MarkerId);
    fn destroy(&mut self);
}

/// In-memory map surface. The browser mirrors its markers onto the real map.
#[derive(Debug)]
pub struct MarkerLayer {
    viewport: Viewport,
    markers: BTreeMap<MarkerId, MarkerSpec>,
    next_id: u64,
    destroyed: bool,
}

impl MarkerLayer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            markers: BTreeMap::new(),
            next_id: 1,
            destroyed: false,
        }
    }

    pub fn markers(&self) -> Vec<RenderedMarker> {
        self.markers
            .iter()
            .map(|(id, spec)| RenderedMarker {
                id: *id,
                spec: spec.clone(),
            })
            .collect()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl MapSurface for MarkerLayer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(id, spec);
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn destroy(&mut self) {
        self.markers.clear();
        self.destroyed = true;
    }
}
