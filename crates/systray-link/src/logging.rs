//! Tracing subscriber setup.
//!
//! Stdout is the native messaging channel; any byte written there that is
//! not a frame corrupts the link. Logs go to stderr and, optionally, to a
//! daily rolling file.

use crate::{
    AppError, AppResult,
    config::{Config, DEFAULT_LOG_FILTER, LoggingConfig},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "systray-link";
const LOG_FILE_SUFFIX: &str = "log";

/// Install the global subscriber.
///
/// Returns the file writer guard when file logging is on; keep it alive for
/// the lifetime of the process or buffered lines are lost.
#[track_caller]
pub(crate) fn init(config: &LoggingConfig) -> AppResult<Option<WorkerGuard>> {
    let filter = || {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let (file_layer, guard) = if config.file {
        let log_dir = Config::log_dir()?;
        std::fs::create_dir_all(&log_dir)?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix(LOG_FILE_SUFFIX)
            .build(&log_dir)
            .map_err(|e| AppError::LoggingError {
                reason: format!("Failed to open log file in {:?}: {}", log_dir, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_filter(filter());

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::LoggingError {
            reason: format!("Failed to install subscriber: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(guard)
}
