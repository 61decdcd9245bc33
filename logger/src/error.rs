use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::cloudwatch_logger::IngestionError;

/// Errors surfaced by the loggers and their configuration.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("No region with id {0}")]
    InvalidRegion(String),

    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("Error writing to log file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating the remote log group or stream failed for a reason other
    /// than the resource already existing.
    #[error("Failed to provision {resource} '{name}': {source}")]
    Provisioning {
        resource: &'static str,
        name: String,
        #[source]
        source: IngestionError,
    },

    #[error("Failed to send log event to {group}/{stream}: {source}")]
    Ingestion {
        group: String,
        stream: String,
        #[source]
        source: IngestionError,
    },

    #[error("Composite logger requires at least one logger")]
    EmptyComposite,

    #[error("{} composite logger destination(s) failed: {}", .0.len(), join_errors(.0))]
    Fanout(Vec<LoggerError>),

    #[error("Failed to start runtime for remote logging: {0}")]
    Runtime(#[source] io::Error),

    #[error("Failed to read config file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid logging configuration: {0}")]
    Config(String),

    #[error("Global logger already initialized")]
    AlreadyInitialized,
}

fn join_errors(errors: &[LoggerError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
