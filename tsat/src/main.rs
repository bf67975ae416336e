use tsat::config::TrackerConfig;
use tsat::tracker::{SaveOutcome, Tracker};

use anyhow::Result;

const CONFIG_FILE: &str = "tsat.toml";

fn main() -> Result<()> {
    // Load configuration
    let config = TrackerConfig::load_or_default(CONFIG_FILE)?;

    // Initialize logging
    let _logging_guard = tsat::logging::init_logging(&config.log_dir, "tsat", &config.log_level)?;

    tracing::info!("tsat starting...");
    tracing::info!(
        "Observer at {:.2}, {:.2}; minimum elevation {} degrees",
        config.latitude,
        config.longitude,
        config.min_elevation
    );

    let mut tracker = Tracker::new(&config)?;

    // Download any catalog we do not have yet
    let outcomes = tracker.save_sources();

    for (url, outcome) in outcomes {
        let path = match outcome {
            SaveOutcome::Saved(path) | SaveOutcome::AlreadyPresent(path) => path,
            SaveOutcome::FetchFailed => continue,
        };

        match tracker.ingest_file(&path) {
            Ok(registry) => {
                let active = registry.iter().filter(|r| r.status().is_active()).count();
                tracing::info!("{}: {} satellites, {} active", url, registry.len(), active);
            }
            Err(e) => tracing::error!("Failed to load {}: {}", url, e),
        }
    }

    Ok(())
}
