use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::map_explorer::ExplorerSettings;
use crate::map_surface::{LngLat, Viewport};

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub base_url: String,
    pub api_key: String,
    pub result_limit: u32,
    pub max_markers: usize,
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub search: SearchConfig,
    pub default_viewport: Viewport,
}

fn env_or<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {}", name))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let request_timeout = match env::var("TRAVEL_EXPLORER_REQUEST_TIMEOUT_SECS") {
            Ok(secs) => Some(Duration::from_secs(
                secs.trim()
                    .parse()
                    .context("Invalid value for TRAVEL_EXPLORER_REQUEST_TIMEOUT_SECS")?,
            )),
            Err(_) => None,
        };

        Ok(Config {
            port: env_or("TRAVEL_EXPLORER_PORT", "18474")?,
            host: env::var("TRAVEL_EXPLORER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            search: SearchConfig {
                base_url: env::var("TRAVEL_EXPLORER_SEARCH_BASE_URL")
                    .unwrap_or_else(|_| "https://api.tomtom.com".to_string()),
                api_key: env::var("TRAVEL_EXPLORER_TOMTOM_API_KEY").unwrap_or_default(),
                result_limit: env_or("TRAVEL_EXPLORER_RESULT_LIMIT", "20")?,
                max_markers: env_or("TRAVEL_EXPLORER_MAX_MARKERS", "8")?,
                request_timeout,
            },
            default_viewport: Viewport {
                center: LngLat {
                    lng: env_or("TRAVEL_EXPLORER_DEFAULT_LON", "77.5946")?,
                    lat: env_or("TRAVEL_EXPLORER_DEFAULT_LAT", "12.9716")?,
                },
                zoom: env_or("TRAVEL_EXPLORER_DEFAULT_ZOOM", "12")?,
            },
        })
    }

    pub fn explorer_settings(&self) -> ExplorerSettings {
        ExplorerSettings {
            default_viewport: self.default_viewport,
            result_limit: self.search.result_limit,
            max_markers: self.search.max_markers,
        }
    }
}
