//! Structured Logger
//!
//! Wraps `tracing` to provide console output, optional JSON file rotation
//! (NDJSON), and environment-based level control.
//!
//! The logger is installed before the config is read so config diagnostics
//! are visible, then [`LoggerHandle::apply`] switches to the configured level
//! and file sink.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::{Identity, Layered};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::Registry, reload, util::SubscriberInitExt, EnvFilter,
    Layer,
};

pub const LOG_FILE_PREFIX: &str = "wayfarer.log";

type FileLayer = Box<dyn Layer<Registry> + Send + Sync>;
type WithFile = Layered<reload::Layer<FileLayer, Registry>, Registry>;

/// Reload handles for a logger installed by [`init_logger`].
pub struct LoggerHandle {
    filter: reload::Handle<EnvFilter, WithFile>,
    file: reload::Handle<FileLayer, Registry>,
}

impl LoggerHandle {
    /// Switch to `level` (unless `RUST_LOG` is set) and, when `log_dir` is
    /// given, also write events as NDJSON to `{log_dir}/wayfarer.log.YYYY-MM-DD`.
    pub fn apply(&self, level: &str, log_dir: Option<&Path>) -> Result<()> {
        self.filter
            .reload(level_filter(level))
            .context("failed to reload log filter")?;

        if let Some(dir) = log_dir {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .build(dir)
                .with_context(|| format!("cannot write logs to {}", dir.display()))?;
            let layer: FileLayer = Box::new(
                fmt::layer()
                    .json()
                    .with_writer(appender)
                    .with_ansi(false),
            );
            self.file
                .reload(layer)
                .context("failed to install file logger")?;
        }
        Ok(())
    }
}

/// Install the global structured logger at `default_level`.
///
/// `RUST_LOG` takes precedence over any level passed here or to
/// [`LoggerHandle::apply`]. Fails if a global logger is already set.
pub fn init_logger(default_level: &str) -> Result<LoggerHandle> {
    let (subscriber, handle) = build_logger(level_filter(default_level));
    subscriber
        .try_init()
        .context("a global logger is already installed")?;
    Ok(handle)
}

fn build_logger(filter: EnvFilter) -> (impl Subscriber + Send + Sync + 'static, LoggerHandle) {
    let no_file: FileLayer = Box::new(Identity::new());
    let (file_layer, file) = reload::Layer::new(no_file);
    let (filter_layer, filter) = reload::Layer::new(filter);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(filter_layer)
        .with(console_layer);
    (subscriber, LoggerHandle { filter, file })
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wayfarer-logger-{}-{name}", std::process::id()))
    }

    fn read_log_files(dir: &Path) -> String {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
            .map(|entry| std::fs::read_to_string(entry.path()).unwrap())
            .collect()
    }

    #[test]
    fn test_apply_adds_file_sink_after_install() {
        let dir = temp_dir("sink");
        let (subscriber, handle) = build_logger(level_filter("info"));
        let _guard = tracing::subscriber::set_default(subscriber);

        tracing::warn!("before the file sink");
        handle.apply("info", Some(&dir)).unwrap();
        tracing::warn!(session_id = "s1", "after the file sink");

        let written = read_log_files(&dir);
        let _ = std::fs::remove_dir_all(&dir);
        assert!(written.contains("after the file sink"));
        assert!(written.contains("\"session_id\":\"s1\""));
        assert!(!written.contains("before the file sink"));
    }

    #[test]
    fn test_unwritable_log_dir_is_an_error() {
        let blocker = temp_dir("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let (_subscriber, handle) = build_logger(level_filter("info"));

        let result = handle.apply("info", Some(&blocker));
        let _ = std::fs::remove_file(&blocker);
        assert!(result.is_err());
    }
}
