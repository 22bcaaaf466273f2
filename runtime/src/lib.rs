//! Logging bootstrap shared by the native LocalFlow binaries.
//!
//! Logs always go to stderr (stdout belongs to command output). Setting
//! `LOG_DIR` adds a daily rolling file next to it.
#![cfg(not(target_arch = "wasm32"))]

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Where and how verbosely a binary logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    /// Directory of the rolling file; `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
    /// File name prefix of the rolling log.
    pub file_prefix: String,
}

impl LoggingConfig {
    /// Stderr-only logging at `info`.
    pub fn new(file_prefix: &str) -> Self {
        Self {
            default_filter: DEFAULT_FILTER.to_string(),
            log_dir: None,
            file_prefix: file_prefix.to_string(),
        }
    }

    /// `LOG_DIR` enables the file sink.
    pub fn from_env(file_prefix: &str) -> Self {
        Self {
            log_dir: std::env::var_os("LOG_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            ..Self::new(file_prefix)
        }
    }

    /// Replace the fallback filter directive.
    pub fn with_default_filter(mut self, filter: &str) -> Self {
        self.default_filter = filter.to_string();
        self
    }

    /// Also write to a daily file under `dir`.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    fn env_filter(&self) -> EnvFilter {
        // Default to info-level logs; override via RUST_LOG if needed.
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// life of the process, otherwise buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let stderr = fmt::layer().with_writer(std::io::stderr);
    let Some(dir) = &config.log_dir else {
        tracing_subscriber::registry()
            .with(config.env_filter())
            .with(stderr)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(stderr)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .context("failed to install tracing subscriber")?;
    tracing::debug!(dir = %dir.display(), "file logging enabled");
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = LoggingConfig::new("lf-cli")
            .with_default_filter("debug")
            .with_log_dir("/tmp/localflow-logs");
        assert_eq!(config.default_filter, "debug");
        assert_eq!(config.file_prefix, "lf-cli");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/localflow-logs")));
    }

    #[test]
    fn file_sink_creates_directory_and_returns_guard() {
        let root = tempfile::tempdir().expect("temp dir");
        let dir = root.path().join("logs");
        let config = LoggingConfig::new("test").with_log_dir(&dir);
        let guard = init_logging(&config).expect("install subscriber");
        assert!(guard.is_some());
        assert!(dir.is_dir());
    }
}
