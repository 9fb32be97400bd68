use serde::Deserialize;
use std::collections::HashSet;
use config::{Config, ConfigError, Environment, File};
use crate::selection::StaleSelectionPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub store: String,
    pub data_file: String,
    pub web_port: u16,
    pub log_level: String,
    #[serde(default)]
    pub geo: GeoConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeoConfig {
    pub default_radius_km: f64,
    pub candidate_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapConfig {
    pub initial_latitude: f64,
    pub initial_longitude: f64,
    pub initial_zoom: f64,
    pub focus_zoom: f64,
    pub focus_duration_ms: u64,
    pub mini_map_zoom: f64,
    pub deselect_on_background_click: bool,
    pub stale_selection: StaleSelectionPolicy,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ImportConfig {
    pub allowed_extensions: HashSet<String>,
    pub media_base_url: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("NOSTOS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: "json".into(),
            data_file: "data/nostos.json".into(),
            web_port: 8080,
            log_level: "info".into(),
            geo: GeoConfig::default(),
            map: MapConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            default_radius_km: 10.0,
            candidate_limit: crate::geo::CANDIDATE_POOL_LIMIT,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_latitude: 38.0934,
            initial_longitude: 37.8781,
            initial_zoom: 8.0,
            focus_zoom: crate::selection::FOCUS_ZOOM,
            focus_duration_ms: crate::selection::FOCUS_DURATION_MS,
            mini_map_zoom: crate::panel::MINI_MAP_ZOOM,
            deselect_on_background_click: false,
            stale_selection: StaleSelectionPolicy::Keep,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: ["jpg", "jpeg", "tif", "tiff", "heic"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            media_base_url: "/media".into(),
        }
    }
}
