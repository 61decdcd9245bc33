/*
 * CloudWatch Logs backend
 *
 * Construction provisions the log group and the log stream, treating
 * "already exists" as success. Each log call then sends exactly one event
 * of the form "[LEVEL] message" stamped with the current time in millis.
 *
 * The remote service is reached through the LogIngestion trait so the AWS
 * client (and the credential/region resolution that comes with it) can be
 * replaced in tests.
 */

use std::future::Future;
use std::io;
use std::panic;
use std::sync::Arc;
use std::thread;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};

use crate::aws_ingestion::AwsLogIngestion;
use crate::aws_region::AwsRegion;
use crate::error::LoggerError;
use crate::log_contracts::{LogLevel, Logger};

/// One event as submitted to the ingestion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLogEvent {
    pub message: String,
    pub timestamp_millis: i64,
}

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Service(String),
}

/// The three operations the CloudWatch logger needs from the remote service.
#[async_trait]
pub trait LogIngestion: Send + Sync {
    async fn create_log_group(&self, group: &str) -> Result<(), IngestionError>;

    async fn create_log_stream(&self, group: &str, stream: &str) -> Result<(), IngestionError>;

    async fn put_log_events(
        &self,
        group: &str,
        stream: &str,
        events: Vec<RemoteLogEvent>,
    ) -> Result<(), IngestionError>;
}

/// Forwards records to a CloudWatch log stream.
///
/// Calls block on a private single-threaded runtime. When the caller is
/// itself running inside a tokio runtime, the blocking call is moved to a
/// scoped thread so async handlers can log too.
pub struct CloudWatchLogger {
    ingestion: Arc<dyn LogIngestion>,
    log_group: String,
    log_stream: String,
    runtime: BlockingRuntime,
}

impl CloudWatchLogger {
    /// Binds an AWS client to `region` using the default credential chain
    /// and provisions `log_group` / `log_stream`.
    pub fn new(
        region: AwsRegion,
        log_group: impl Into<String>,
        log_stream: impl Into<String>,
    ) -> Result<Self, LoggerError> {
        let runtime = build_runtime()?;
        let ingestion = runtime.block_on(AwsLogIngestion::new(region))?;
        Self::provision(runtime, Arc::new(ingestion), log_group.into(), log_stream.into())
    }

    pub fn with_ingestion(
        ingestion: Arc<dyn LogIngestion>,
        log_group: impl Into<String>,
        log_stream: impl Into<String>,
    ) -> Result<Self, LoggerError> {
        let runtime = build_runtime()?;
        Self::provision(runtime, ingestion, log_group.into(), log_stream.into())
    }

    pub fn log_group(&self) -> &str {
        &self.log_group
    }

    pub fn log_stream(&self) -> &str {
        &self.log_stream
    }

    fn provision(
        runtime: BlockingRuntime,
        ingestion: Arc<dyn LogIngestion>,
        log_group: String,
        log_stream: String,
    ) -> Result<Self, LoggerError> {
        let group_created = runtime.block_on(ingestion.create_log_group(&log_group))?;
        tolerate_existing(group_created).map_err(|source| LoggerError::Provisioning {
            resource: "log group",
            name: log_group.clone(),
            source,
        })?;

        let stream_created =
            runtime.block_on(ingestion.create_log_stream(&log_group, &log_stream))?;
        tolerate_existing(stream_created).map_err(|source| LoggerError::Provisioning {
            resource: "log stream",
            name: format!("{}/{}", log_group, log_stream),
            source,
        })?;

        tracing::debug!(group = %log_group, stream = %log_stream, "cloudwatch log stream ready");

        Ok(Self {
            ingestion,
            log_group,
            log_stream,
            runtime,
        })
    }
}

impl Logger for CloudWatchLogger {
    fn try_log(&self, message: &str, level: LogLevel) -> Result<(), LoggerError> {
        let event = RemoteLogEvent {
            message: format!("[{}] {}", level, message),
            timestamp_millis: Utc::now().timestamp_millis(),
        };

        self.runtime
            .block_on(
                self.ingestion
                    .put_log_events(&self.log_group, &self.log_stream, vec![event]),
            )?
            .map_err(|source| LoggerError::Ingestion {
                group: self.log_group.clone(),
                stream: self.log_stream.clone(),
                source,
            })
    }

    // Remote failures are degraded to a warning rather than an error event
    fn log(&self, message: &str, level: LogLevel) {
        if let Err(e) = self.try_log(message, level) {
            tracing::warn!(level = %level, error = %e, "dropped cloudwatch log event");
        }
    }
}

/// Private current-thread runtime that can be entered and dropped from
/// inside another runtime.
struct BlockingRuntime {
    runtime: Option<Runtime>,
}

impl BlockingRuntime {
    fn block_on<F>(&self, future: F) -> Result<F::Output, LoggerError>
    where
        F: Future + Send,
        F::Output: Send,
    {
        let runtime = self.runtime.as_ref().ok_or_else(|| {
            LoggerError::Runtime(io::Error::new(io::ErrorKind::Other, "runtime already shut down"))
        })?;

        // Nested block_on panics, so hop off the caller's runtime thread
        if Handle::try_current().is_err() {
            return Ok(runtime.block_on(future));
        }

        Ok(thread::scope(|scope| {
            scope
                .spawn(|| runtime.block_on(future))
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload))
        }))
    }
}

impl Drop for BlockingRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

fn build_runtime() -> Result<BlockingRuntime, LoggerError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(LoggerError::Runtime)?;
    Ok(BlockingRuntime {
        runtime: Some(runtime),
    })
}

fn tolerate_existing(result: Result<(), IngestionError>) -> Result<(), IngestionError> {
    match result {
        Err(IngestionError::AlreadyExists(name)) => {
            tracing::debug!(resource = %name, "already exists, reusing");
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_is_not_an_error() {
        assert!(tolerate_existing(Err(IngestionError::AlreadyExists("g".into()))).is_ok());
        assert!(tolerate_existing(Ok(())).is_ok());
        assert!(matches!(
            tolerate_existing(Err(IngestionError::Service("denied".into()))),
            Err(IngestionError::Service(_))
        ));
    }
}
