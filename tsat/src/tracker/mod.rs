///! Tracker: catalog retrieval, parsing and lookup as one workflow
///!
///! Owns the registry, the observer and the configured sources. Everything is
///! synchronous; the observer's clock is driven by the caller.

mod fetch;
mod store;

pub use fetch::{HttpSource, TextSource};
pub use store::{local_path, save_if_absent, SaveOutcome};

use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tsat_common::{parse_into, ParseOutcome, Registry};

use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::observer::{Observer, Propagator, SatLoc};

pub struct Tracker<S: TextSource = HttpSource> {
    registry: Registry,
    observer: Observer,
    min_elevation: f64,
    sources: Vec<String>,
    download_dir: PathBuf,
    source: S,
}

impl Tracker<HttpSource> {
    /// Tracker fetching over HTTP with the configured timeout
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let source = HttpSource::new(config.request_timeout_secs)?;
        Ok(Self::with_source(config, source))
    }
}

impl<S: TextSource> Tracker<S> {
    pub fn with_source(config: &TrackerConfig, source: S) -> Self {
        let observer = Observer::from_degrees(
            config.latitude,
            config.longitude,
            config.altitude_m / 1000.0,
            Utc::now(),
        );

        Self {
            registry: Registry::new(),
            observer,
            min_elevation: config.min_elevation,
            sources: config.sources.clone(),
            download_dir: config.download_dir.clone(),
            source,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut Observer {
        &mut self.observer
    }

    /// Visibility threshold in degrees
    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Best-effort fetch; `None` on any failure
    pub fn fetch_text(&self, url: &str) -> Option<String> {
        self.source.fetch_text(url)
    }

    /// Replace the registry contents with the records in `text`
    pub fn ingest(&mut self, text: &str) -> &Registry {
        match parse_into(text, &mut self.registry) {
            ParseOutcome::Complete { records } => {
                debug!("Ingested {} records", records);
            }
            ParseOutcome::Truncated { records, abandoned } => {
                warn!(
                    "Catalog text ended early: kept {} records, abandoned {} name lines",
                    records, abandoned
                );
            }
        }
        &self.registry
    }

    /// Read a saved catalog and ingest it
    pub fn ingest_file(&mut self, path: impl AsRef<Path>) -> Result<&Registry> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TrackerError::io(path, e))?;
        info!("Loaded catalog {:?}", path);
        Ok(self.ingest(&text))
    }

    /// Where `save_if_absent` would put `url`
    pub fn local_path(&self, url: &str) -> Option<PathBuf> {
        local_path(&self.download_dir, url)
    }

    pub fn save_if_absent(&self, url: &str) -> Result<SaveOutcome> {
        save_if_absent(&self.source, &self.download_dir, url)
    }

    /// `save_if_absent` for every configured source; failures are logged and skipped
    pub fn save_sources(&self) -> Vec<(String, SaveOutcome)> {
        let mut outcomes = Vec::with_capacity(self.sources.len());

        for url in &self.sources {
            match self.save_if_absent(url) {
                Ok(outcome) => outcomes.push((url.clone(), outcome)),
                Err(e) => {
                    warn!("Failed to save {}: {}", url, e);
                    outcomes.push((url.clone(), SaveOutcome::FetchFailed));
                }
            }
        }

        let saved = outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, SaveOutcome::Saved(_)))
            .count();
        info!("Catalog sweep: {} of {} sources downloaded", saved, outcomes.len());
        outcomes
    }

    /// Look angle to `name` at the observer's current date
    pub fn look(&self, name: &str) -> Result<SatLoc> {
        let record = self
            .registry
            .find(name)
            .ok_or_else(|| TrackerError::UnknownSatellite(name.to_string()))?;
        let propagator = Propagator::from_record(record)?;
        let look = self.observer.look(&propagator)?;
        Ok(SatLoc::new(self.observer.date, &look))
    }
}
