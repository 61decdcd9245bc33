/*
 * Logging configuration
 *
 * Parsed from TOML, either under a [logging] section or as a bare table:
 *
 *   [logging]
 *   threshold = "info"
 *
 *   [[logging.outputs]]
 *   type = "file"
 *   file_path = "logs/app.log"
 *
 *   [[logging.outputs]]
 *   type = "cloudwatch"
 *   region = "us-east-1"
 *   log_group = "my-app"
 *   log_stream = "worker-1"
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::aws_region::AwsRegion;
use crate::error::LoggerError;
use crate::log_contracts::LogLevel;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputConfig {
    File {
        file_path: PathBuf,
    },
    #[serde(alias = "cloud_watch")]
    CloudWatch {
        region: AwsRegion,
        log_group: String,
        log_stream: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level to record; everything passes when unset
    #[serde(default)]
    pub threshold: Option<LogLevel>,

    #[serde(default)]
    pub outputs: Vec<OutputConfig>,
}

#[derive(Deserialize)]
struct ConfigWrapper {
    logging: LoggingConfig,
}

impl LoggingConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoggerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }
}

impl FromStr for LoggingConfig {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Prefer the [logging] section, fall back to a bare table
        match toml::from_str::<ConfigWrapper>(s) {
            Ok(wrapper) => Ok(wrapper.logging),
            Err(e) => toml::from_str::<LoggingConfig>(s).map_err(|_| LoggerError::ConfigParse(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_logging_section() {
        let config: LoggingConfig = r#"
            [logging]
            threshold = "WARNING"

            [[logging.outputs]]
            type = "file"
            file_path = "logs/app.log"

            [[logging.outputs]]
            type = "cloudwatch"
            region = "EU-WEST-1"
            log_group = "orders"
            log_stream = "api-1"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.threshold, Some(LogLevel::Warn));
        assert_eq!(
            config.outputs,
            vec![
                OutputConfig::File {
                    file_path: PathBuf::from("logs/app.log")
                },
                OutputConfig::CloudWatch {
                    region: AwsRegion::EuWest1,
                    log_group: "orders".into(),
                    log_stream: "api-1".into(),
                },
            ]
        );
    }

    #[test]
    fn parses_bare_table() {
        let config: LoggingConfig = r#"
            [[outputs]]
            type = "file"
            file_path = "app.log"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.threshold, None);
        assert_eq!(config.outputs.len(), 1);
    }

    #[test]
    fn unknown_region_is_a_parse_error() {
        let result: Result<LoggingConfig, _> = r#"
            [[logging.outputs]]
            type = "cloudwatch"
            region = "moon-1"
            log_group = "g"
            log_stream = "s"
        "#
        .parse();

        let err = result.unwrap_err();
        assert!(matches!(err, LoggerError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = LoggingConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, LoggerError::ConfigRead { ref path, .. } if path == Path::new("/definitely/not/here.toml")));
    }
}
