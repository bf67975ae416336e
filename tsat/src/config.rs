use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default catalog sources: active, weather and amateur element sets
pub const DEFAULT_SOURCES: &[&str] = &[
    "http://celestrak.com/NORAD/elements/active.txt",
    "http://celestrak.com/NORAD/elements/weather.txt",
    "http://celestrak.com/NORAD/elements/amateur.txt",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Catalog URLs used by `save_sources`
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    /// Minimum elevation in degrees for a sample to count as visible
    #[serde(default = "default_min_elevation")]
    pub min_elevation: f64,

    /// Observer latitude in degrees
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Observer longitude in degrees, east positive
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Observer altitude above the ellipsoid in metres
    #[serde(default)]
    pub altitude_m: f64,

    /// Where downloaded catalogs are written
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_sources() -> Vec<String> {
    DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
}

fn default_min_elevation() -> f64 {
    10.0
}

fn default_latitude() -> f64 {
    15.15
}

fn default_longitude() -> f64 {
    120.70
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            min_elevation: default_min_elevation(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            altitude_m: 0.0,
            download_dir: default_download_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            log_dir: default_log_dir(),
            log_level: default_log_level(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: TrackerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
