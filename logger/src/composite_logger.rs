use std::sync::Arc;

use crate::error::LoggerError;
use crate::log_contracts::{LogLevel, Logger};

/// Fans every record out to a fixed, ordered list of loggers.
///
/// A failing destination never stops the remaining ones from being tried.
pub struct CompositeLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl CompositeLogger {
    pub fn new(loggers: Vec<Arc<dyn Logger>>) -> Result<Self, LoggerError> {
        if loggers.is_empty() {
            return Err(LoggerError::EmptyComposite);
        }
        Ok(Self { loggers })
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Logger for CompositeLogger {
    fn try_log(&self, message: &str, level: LogLevel) -> Result<(), LoggerError> {
        let failures: Vec<LoggerError> = self
            .loggers
            .iter()
            .filter_map(|logger| logger.try_log(message, level).err())
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::Fanout(failures))
        }
    }

    // Each child applies its own reporting policy
    fn log(&self, message: &str, level: LogLevel) {
        for logger in &self.loggers {
            logger.log(message, level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_list() {
        assert!(matches!(
            CompositeLogger::new(Vec::new()),
            Err(LoggerError::EmptyComposite)
        ));
    }
}
