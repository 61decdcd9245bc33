use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::LoggerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

// Case-insensitive so config files can say "info" or "INFO"
impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::unknown_variant(
                &s,
                &["debug", "info", "warn", "warning", "error", "critical"],
            )
        })
    }
}

/// A destination for log records.
///
/// Implementors only provide [`Logger::try_log`]. Callers normally use
/// [`Logger::log`], which never fails: errors are reported through `tracing`
/// and then dropped so that logging cannot take the application down.
pub trait Logger: Send + Sync {
    fn try_log(&self, message: &str, level: LogLevel) -> Result<(), LoggerError>;

    fn log(&self, message: &str, level: LogLevel) {
        if let Err(e) = self.try_log(message, level) {
            tracing::error!(level = %level, error = %e, "dropped log record");
        }
    }

    fn debug(&self, message: &str) { self.log(message, LogLevel::Debug); }
    fn info(&self, message: &str) { self.log(message, LogLevel::Info); }
    fn warn(&self, message: &str) { self.log(message, LogLevel::Warn); }
    fn error(&self, message: &str) { self.log(message, LogLevel::Error); }
    fn critical(&self, message: &str) { self.log(message, LogLevel::Critical); }
}
