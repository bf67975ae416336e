///! Local copies of downloaded catalogs
///!
///! A catalog is saved under the final path segment of its URL. An existing
///! file is never re-fetched or checked.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::fetch::TextSource;
use crate::error::{Result, TrackerError};

/// What `save_if_absent` did for one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A file with that name was already there; nothing fetched
    AlreadyPresent(PathBuf),
    /// Fetched and written
    Saved(PathBuf),
    /// The fetch returned nothing; no file written
    FetchFailed,
}

/// File name for `url` inside `dir`, from the URL's last path segment
pub fn local_path(dir: &Path, url: &str) -> Option<PathBuf> {
    let without_query = url.split(['?', '#']).next()?;
    let segment = without_query.rsplit('/').next()?;
    if matches!(segment, "" | "." | "..") || segment.contains(':') {
        return None;
    }
    Some(dir.join(segment))
}

/// Fetch `url` into `dir` unless a file of the same name already exists
pub fn save_if_absent<S: TextSource>(source: &S, dir: &Path, url: &str) -> Result<SaveOutcome> {
    let path = local_path(dir, url).ok_or_else(|| {
        TrackerError::io(
            dir,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("no file name in URL '{}'", url),
            ),
        )
    })?;

    if path.is_file() {
        debug!("{:?} already present, skipping {}", path, url);
        return Ok(SaveOutcome::AlreadyPresent(path));
    }

    let Some(text) = source.fetch_text(url) else {
        warn!("Could not fetch {}", url);
        return Ok(SaveOutcome::FetchFailed);
    };

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| TrackerError::io(dir, e))?;
        info!("Created download directory: {:?}", dir);
    }

    fs::write(&path, text).map_err(|e| TrackerError::io(&path, e))?;
    info!("Saved {} to {:?}", url, path);
    Ok(SaveOutcome::Saved(path))
}
