use std::sync::Arc;

use crate::error::LoggerError;
use crate::log_contracts::{LogLevel, Logger};

/// Forwards records at or above `threshold` and drops the rest.
pub struct ThresholdLogger {
    threshold: LogLevel,
    inner: Arc<dyn Logger>,
}

impl ThresholdLogger {
    pub fn new(threshold: LogLevel, inner: Arc<dyn Logger>) -> Self {
        Self { threshold, inner }
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }
}

impl Logger for ThresholdLogger {
    fn try_log(&self, message: &str, level: LogLevel) -> Result<(), LoggerError> {
        if level < self.threshold {
            return Ok(());
        }
        self.inner.try_log(message, level)
    }

    fn log(&self, message: &str, level: LogLevel) {
        if level < self.threshold {
            return;
        }
        self.inner.log(message, level);
    }
}
