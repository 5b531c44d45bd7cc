// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subscriber setup for applications embedding the wallet core.
//!
//! The library itself only emits `tracing` events; nothing is printed until
//! the application calls [`init_with_config`].

use airgap_substrate_config::LogConfig;
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FILE_NAME: &str = "logs.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Configuration for logging initialization
pub struct LoggingConfig<'a> {
    pub level: &'a str,
    pub json_format: bool,
    pub strip_ansi: bool,
    pub write_to_file: bool,
    pub write_path: &'a str,
    pub write_max_file_size: u64,
    pub write_max_files: usize,
}

impl<'a> From<&'a LogConfig> for LoggingConfig<'a> {
    fn from(config: &'a LogConfig) -> Self {
        Self {
            level: &config.level,
            json_format: config.json,
            strip_ansi: config.strip_ansi,
            write_to_file: config.write,
            write_path: &config.write_path,
            write_max_file_size: config.write_max_file_size,
            write_max_files: config.write_max_files,
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn console_layer(json_format: bool, strip_ansi: bool) -> BoxedLayer {
    if json_format {
        fmt::layer().json().boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(!strip_ansi)
            .boxed()
    }
}

fn file_layer(config: &LoggingConfig<'_>) -> Result<(BoxedLayer, WorkerGuard), LoggingError> {
    std::fs::create_dir_all(config.write_path)?;

    // write_max_files counts the current file: logs.log plus logs.log.{1..n-1}
    let appender = BasicRollingFileAppender::new(
        PathBuf::from(config.write_path).join(LOG_FILE_NAME),
        RollingConditionBasic::new().max_size(config.write_max_file_size),
        config.write_max_files.saturating_sub(1),
    )?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = if config.json_format {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    };

    Ok((layer, guard))
}

fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|source| LoggingError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}

/// Install the global subscriber.
///
/// When file output is enabled the returned guard flushes the background
/// writer on drop and must be kept alive for as long as logs should be written.
///
/// ```no_run
/// use airgap_substrate::logging::{self, LoggingConfig};
///
/// let _guard = logging::init_with_config(LoggingConfig {
///     level: "debug",
///     json_format: false,
///     strip_ansi: false,
///     write_to_file: true,
///     write_path: "./logs",
///     write_max_file_size: 5242880,
///     write_max_files: 5,
/// })?;
/// # Ok::<(), airgap_substrate::logging::LoggingError>(())
/// ```
pub fn init_with_config(config: LoggingConfig<'_>) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = env_filter(config.level)?;

    let mut layers = vec![console_layer(config.json_format, config.strip_ansi)];
    let guard = if config.write_to_file {
        let (layer, guard) = file_layer(&config)?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> LogConfig {
        LogConfig {
            level: level.to_string(),
            json: false,
            strip_ansi: true,
            write: false,
            write_path: "./logs".to_string(),
            write_max_file_size: 1024,
            write_max_files: 2,
        }
    }

    #[test]
    fn test_from_log_config() {
        let log = config("debug");
        let logging = LoggingConfig::from(&log);
        assert_eq!(logging.level, "debug");
        assert!(logging.strip_ansi);
        assert!(!logging.write_to_file);
        assert_eq!(logging.write_max_files, 2);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        assert!(matches!(
            env_filter("airgap_substrate=loud"),
            Err(LoggingError::InvalidLogLevel { .. })
        ));
        assert!(env_filter("airgap_substrate=trace,info").is_ok());
    }

    #[test]
    fn test_file_layer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested");
        let path = path.to_str().unwrap();
        let logging = LoggingConfig {
            level: "info",
            json_format: true,
            strip_ansi: false,
            write_to_file: true,
            write_path: path,
            write_max_file_size: 1024,
            write_max_files: 2,
        };
        let (_layer, _guard) = file_layer(&logging).unwrap();
        assert!(std::path::Path::new(path).is_dir());
    }
}
