use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use anyhow::Context;
use tokio::task;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Keeps the file writer alive; logs are flushed when it is dropped
#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

/// Map a configured level to a valid one, falling back to `info`
pub fn normalize_level(level: &str) -> &'static str {
    parse_level(level).unwrap_or("info")
}

/// Known level names, ignoring case and surrounding spaces
fn parse_level(level: &str) -> Option<&'static str> {
    let level = level.trim().to_ascii_lowercase();
    LEVELS.iter().copied().find(|l| *l == level)
}

/// Log to stderr and to a daily rolling file in `log_dir`.
///
/// Must be called from inside a tokio runtime: old files are removed by a
/// background task.
pub fn init_logging(
    log_dir: impl AsRef<Path>,
    prefix: &str,
    level: &str,
) -> anyhow::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref().to_path_buf();

    let normalized = normalize_level(level);
    let builder = EnvFilter::builder().with_default_directive(
        normalized
            .parse()
            .with_context(|| format!("Invalid log level {}", normalized))?,
    );

    let console_filter = builder
        .clone()
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());
    let file_filter = builder.parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(&log_dir)
        .with_context(|| format!("Failed to create file appender in {:?}", log_dir))?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    // stdout belongs to the command loop
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if parse_level(level).is_none() {
        tracing::warn!("Invalid log level '{}', defaulting to '{}'", level, normalized);
    }

    start_log_cleanup_task(log_dir, prefix.to_string());

    Ok(LoggerGuard(guard))
}

fn start_log_cleanup_task(log_dir: PathBuf, prefix: String) {
    const MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 3);
    const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

    task::spawn(async move {
        loop {
            match cleanup_old_logs(&log_dir, &prefix, MAX_AGE) {
                Ok(deleted) if deleted > 0 => {
                    tracing::info!("Deleted {} old log files from {:?}", deleted, log_dir)
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Failed to delete old log file: {}", e),
            }
            tokio::time::sleep(CLEANUP_INTERVAL).await;
        }
    });
}

/// Remove `<prefix>*.log` files older than `max_age`; returns how many
fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let mut deleted = 0;

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.starts_with(prefix) && file_name.ends_with(".log") {
                let metadata = fs::metadata(&path)?;
                if let Ok(modified) = metadata.modified() {
                    if now.duration_since(modified).unwrap_or_default() > max_age {
                        fs::remove_file(&path)?;
                        deleted += 1;
                        tracing::debug!("Old log file deleted: {}", file_name);
                    }
                }
            }
        }
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("debug"), "debug");
        assert_eq!(normalize_level(" WARN "), "warn");
        assert_eq!(normalize_level("verbose"), "info");
    }

    #[test]
    fn test_spaced_or_uppercase_levels_are_accepted() {
        assert_eq!(parse_level(" WARN "), Some("warn"));
        assert_eq!(parse_level("Trace"), Some("trace"));
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_cleanup_keeps_recent_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sat-selector.2026-10-19.log"), "recent").unwrap();
        fs::write(dir.path().join("other.log"), "not ours").unwrap();

        let deleted =
            cleanup_old_logs(dir.path(), "sat-selector", Duration::from_secs(3600)).unwrap();
        assert_eq!(deleted, 0);

        // everything of ours is older than zero seconds
        std::thread::sleep(Duration::from_millis(20));
        let deleted = cleanup_old_logs(dir.path(), "sat-selector", Duration::ZERO).unwrap();
        assert_eq!(deleted, 1);
        assert!(dir.path().join("other.log").exists());
    }
}
