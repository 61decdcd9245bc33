/*
 * Pluggable logger
 *
 * One Logger trait with interchangeable backends:
 * - FileLogger: timestamped lines appended to a local text file
 * - CloudWatchLogger: events forwarded to an AWS CloudWatch Logs stream
 * - CompositeLogger: fans every record out to several loggers in order
 *
 * Loggers can be built directly or from a TOML LoggingConfig, and one of
 * them can be installed process-wide for use with the log_* macros.
 */

pub mod aws_ingestion;
pub mod aws_region;
pub mod cloudwatch_logger;
pub mod composite_logger;
pub mod error;
pub mod file_logger;
pub mod global;
pub mod log_config;
pub mod log_contracts;
pub mod logger_loader;
pub mod threshold_logger;

pub use aws_ingestion::AwsLogIngestion;
pub use aws_region::AwsRegion;
pub use cloudwatch_logger::{CloudWatchLogger, IngestionError, LogIngestion, RemoteLogEvent};
pub use composite_logger::CompositeLogger;
pub use error::LoggerError;
pub use file_logger::FileLogger;
pub use global::{global, init, init_with_config_file};
pub use log_config::{LoggingConfig, OutputConfig};
pub use log_contracts::{LogLevel, Logger};
pub use logger_loader::LoggerLoader;
pub use threshold_logger::ThresholdLogger;

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::global::log_to_global($crate::LogLevel::Debug, &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::global::log_to_global($crate::LogLevel::Info, &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        $crate::global::log_to_global($crate::LogLevel::Warn, &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::global::log_to_global($crate::LogLevel::Error, &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)+) => {
        $crate::global::log_to_global($crate::LogLevel::Critical, &format!($($arg)+))
    };
}
