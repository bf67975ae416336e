use anyhow::Context;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log files older than this are removed at start-up
const MAX_LOG_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 3);

/// Keeps the background log writer alive; drop it last
#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

pub fn init_logging(log_dir: impl AsRef<Path>, prefix: &str, level: &str) -> anyhow::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref();

    let level = normalize_level(level);
    let directive: Directive = level.parse().context("Invalid log level directive")?;
    let builder = EnvFilter::builder().with_default_directive(directive);

    let console_filter = builder.clone().parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());
    let file_filter = builder.parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create file appender")?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    if let Err(e) = cleanup_old_logs(log_dir, prefix, MAX_LOG_AGE) {
        tracing::warn!("Failed to delete old log file: {}", e);
    }

    Ok(LoggerGuard(guard))
}

fn normalize_level(level: &str) -> &str {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            "info"
        }
    }
}

/// Remove `<prefix>*.log` files in `log_dir` last modified more than `max_age` ago
fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let expired: Vec<PathBuf> = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_rotated_log(path, prefix))
        .filter(|path| age_of(path, now).is_some_and(|age| age > max_age))
        .collect();

    for path in &expired {
        fs::remove_file(path)?;
        tracing::info!("Old log file deleted: {:?}", path);
    }
    Ok(expired.len())
}

fn is_rotated_log(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(prefix) && name.ends_with(".log"))
}

fn age_of(path: &Path, now: SystemTime) -> Option<Duration> {
    let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok()?;
    Some(now.duration_since(modified).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("debug"), "debug");
        assert_eq!(normalize_level("loud"), "info");
    }

    #[test]
    fn test_is_rotated_log() {
        assert!(is_rotated_log(Path::new("logs/tsat.2019-10-02.log"), "tsat"));
        assert!(!is_rotated_log(Path::new("logs/tsat.2019-10-02.txt"), "tsat"));
        assert!(!is_rotated_log(Path::new("logs/other.2019-10-02.log"), "tsat"));
    }

    #[test]
    fn test_cleanup_keeps_fresh_and_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("tsat.2019-10-02.log"), "fresh").unwrap();
        fs::write(temp_dir.path().join("weather.txt"), "catalog").unwrap();

        let removed = cleanup_old_logs(temp_dir.path(), "tsat", MAX_LOG_AGE).unwrap();

        assert_eq!(removed, 0);
        assert!(temp_dir.path().join("tsat.2019-10-02.log").exists());
    }

    #[test]
    fn test_cleanup_removes_expired_logs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("tsat.2019-10-02.log"), "old").unwrap();
        fs::write(temp_dir.path().join("weather.txt"), "catalog").unwrap();

        // Every file is older than a zero max age
        std::thread::sleep(Duration::from_millis(20));
        let removed = cleanup_old_logs(temp_dir.path(), "tsat", Duration::ZERO).unwrap();

        assert_eq!(removed, 1);
        assert!(!temp_dir.path().join("tsat.2019-10-02.log").exists());
        assert!(temp_dir.path().join("weather.txt").exists());
    }

    #[test]
    fn test_init_logging_writes_to_directory() {
        let temp_dir = TempDir::new().unwrap();
        let guard = init_logging(temp_dir.path(), "tsat", "debug").unwrap();
        tracing::info!("logging initialised");
        drop(guard);

        let has_log = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_string_lossy().starts_with("tsat"));
        assert!(has_log);
    }
}
