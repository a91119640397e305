use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::map_surface::LngLat;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),
    #[error("Invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid search URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Search base URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),
    #[error("Search task failed: {0}")]
    Task(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Top-level body of a POI search reply.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<PoiResult>,
}

/// One raw search hit. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiResult {
    #[serde(default)]
    pub poi: Option<PoiDetails>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    #[serde(default)]
    pub brands: Vec<Brand>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Brand {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub freeform_address: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl PoiResult {
    pub fn name(&self) -> Option<&str> {
        self.poi
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .filter(|n| !n.is_empty())
    }

    pub fn freeform_address(&self) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(|a| a.freeform_address.as_deref())
            .filter(|a| !a.is_empty())
    }

    pub fn categories(&self) -> &[String] {
        self.poi
            .as_ref()
            .map(|p| p.categories.as_slice())
            .unwrap_or_default()
    }

    pub fn classifications(&self) -> &[Classification] {
        self.poi
            .as_ref()
            .map(|p| p.classifications.as_slice())
            .unwrap_or_default()
    }

    pub fn brands(&self) -> &[Brand] {
        self.poi
            .as_ref()
            .map(|p| p.brands.as_slice())
            .unwrap_or_default()
    }

    pub fn phone(&self) -> Option<&str> {
        self.poi
            .as_ref()
            .and_then(|p| p.phone.as_deref())
            .filter(|p| !p.is_empty())
    }

    pub fn website(&self) -> Option<&str> {
        self.poi
            .as_ref()
            .and_then(|p| p.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub center: LngLat,
    pub radius: u32,
    pub limit: u32,
}

/// Source of POI search hits around a point.
#[async_trait]
pub trait PoiSource: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> SearchResult<Vec<PoiResult>>;
}

/// POI search against the TomTom Search API.
#[derive(Clone)]
pub struct TomTomClient {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl TomTomClient {
    pub fn new(base_url: String, api_key: String, timeout: Option<Duration>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into();

        Self {
            base_url,
            api_key,
            agent,
        }
    }

    pub fn search_url(&self, request: &SearchRequest) -> SearchResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        let file = format!("{}.json", request.query);

        url.path_segments_mut()
            .map_err(|_| SearchError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["search", "2", "poiSearch", file.as_str()]);

        url.query_pairs_mut()
            .append_pair("lat", &request.center.lat.to_string())
            .append_pair("lon", &request.center.lng.to_string())
            .append_pair("radius", &request.radius.to_string())
            .append_pair("limit", &request.limit.to_string())
            .append_pair("key", &self.api_key);

        Ok(url)
    }
}

fn fetch_blocking(agent: &ureq::Agent, url: &Url) -> SearchResult<Vec<PoiResult>> {
    let mut response = agent.get(url.as_str()).call()?;
    let body = response.body_mut().read_to_string()?;
    let parsed: SearchResponse = serde_json::from_str(&body)?;
    Ok(parsed.results)
}

#[async_trait]
impl PoiSource for TomTomClient {
    async fn search(&self, request: &SearchRequest) -> SearchResult<Vec<PoiResult>> {
        let url = self.search_url(request)?;
        let agent = self.agent.clone();

        log::debug!(
            "POI search '{}' around {},{} radius {}m",
            request.query,
            request.center.lat,
            request.center.lng,
            request.radius
        );

        tokio::task::spawn_blocking(move || fetch_blocking(&agent, &url))
            .await
            .map_err(|e| SearchError::Task(e.to_string()))?
    }
}
