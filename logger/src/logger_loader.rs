use std::sync::Arc;

use crate::cloudwatch_logger::CloudWatchLogger;
use crate::composite_logger::CompositeLogger;
use crate::error::LoggerError;
use crate::file_logger::FileLogger;
use crate::log_config::{LoggingConfig, OutputConfig};
use crate::log_contracts::Logger;
use crate::threshold_logger::ThresholdLogger;

pub struct LoggerLoader;

impl LoggerLoader {
    /// Builds the logger described by `config`.
    ///
    /// One output is returned as is, several are wrapped in a
    /// [`CompositeLogger`] in declaration order. CloudWatch outputs are
    /// provisioned here, so this fails if a log group or stream cannot be
    /// created.
    pub fn load(config: &LoggingConfig) -> Result<Arc<dyn Logger>, LoggerError> {
        let mut outputs = config
            .outputs
            .iter()
            .map(Self::build_output)
            .collect::<Result<Vec<_>, _>>()?;

        let logger: Arc<dyn Logger> = match outputs.len() {
            0 => return Err(LoggerError::Config("no logging outputs configured".into())),
            1 => outputs.remove(0),
            _ => Arc::new(CompositeLogger::new(outputs)?),
        };

        Ok(match config.threshold {
            Some(threshold) => Arc::new(ThresholdLogger::new(threshold, logger)),
            None => logger,
        })
    }

    fn build_output(output: &OutputConfig) -> Result<Arc<dyn Logger>, LoggerError> {
        match output {
            OutputConfig::File { file_path } => Ok(Arc::new(FileLogger::new(file_path))),
            OutputConfig::CloudWatch {
                region,
                log_group,
                log_stream,
            } => {
                tracing::info!(%region, group = %log_group, stream = %log_stream, "setting up cloudwatch logger");
                Ok(Arc::new(CloudWatchLogger::new(
                    *region,
                    log_group.as_str(),
                    log_stream.as_str(),
                )?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_contracts::LogLevel;
    use std::fs;

    #[test]
    fn empty_config_is_rejected() {
        let config = LoggingConfig {
            threshold: None,
            outputs: Vec::new(),
        };
        assert!(matches!(LoggerLoader::load(&config), Err(LoggerError::Config(_))));
    }

    #[test]
    fn builds_file_fanout_with_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");
        let config = LoggingConfig {
            threshold: Some(LogLevel::Info),
            outputs: vec![
                OutputConfig::File { file_path: first.clone() },
                OutputConfig::File { file_path: second.clone() },
            ],
        };

        let logger = LoggerLoader::load(&config).unwrap();
        logger.log("ignored", LogLevel::Debug);
        logger.log("kept", LogLevel::Info);

        for path in [first, second] {
            let contents = fs::read_to_string(path).unwrap();
            assert!(!contents.contains("ignored"));
            assert!(contents.lines().last().unwrap().ends_with("[INFO] kept"));
        }
    }
}
