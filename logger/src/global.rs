/*
 * Process-wide logger
 *
 * The application installs one logger at startup; the log_* macros route
 * through it. Before installation, records go to stderr so nothing is lost
 * during early startup.
 */

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use once_cell::sync::OnceCell;

use crate::error::LoggerError;
use crate::log_config::LoggingConfig;
use crate::log_contracts::{LogLevel, Logger};
use crate::logger_loader::LoggerLoader;

static LOGGER_INSTANCE: OnceCell<Arc<dyn Logger>> = OnceCell::new();

/// Installs `logger` as the process-wide logger. Can only be done once.
pub fn init(logger: Arc<dyn Logger>) -> Result<(), LoggerError> {
    LOGGER_INSTANCE
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// Loads a [`LoggingConfig`] from `path`, builds it and installs the result.
pub fn init_with_config_file(path: impl AsRef<Path>) -> Result<(), LoggerError> {
    let config = LoggingConfig::from_file(path)?;
    let logger = LoggerLoader::load(&config)?;
    init(logger)
}

pub fn global() -> Option<&'static Arc<dyn Logger>> {
    LOGGER_INSTANCE.get()
}

#[doc(hidden)]
pub fn log_to_global(level: LogLevel, message: &str) {
    match global() {
        Some(logger) => logger.log(message, level),
        None => {
            let line = format!(
                "{} [{}] {}\n",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                level,
                message
            );
            let _ = io::stderr().write_all(line.as_bytes());
        }
    }
}
