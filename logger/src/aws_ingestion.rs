use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatchlogs::config::Region;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::types::InputLogEvent;
use aws_sdk_cloudwatchlogs::Client;
use async_trait::async_trait;

use crate::aws_region::AwsRegion;
use crate::cloudwatch_logger::{IngestionError, LogIngestion, RemoteLogEvent};

/// CloudWatch Logs client bound to a single region.
///
/// Credentials come from the default provider chain (environment, profile,
/// instance metadata, ...); none are ever passed in.
#[derive(Debug, Clone)]
pub struct AwsLogIngestion {
    inner_client: Client,
}

impl AwsLogIngestion {
    pub async fn new(region: AwsRegion) -> Self {
        let region_provider = RegionProviderChain::first_try(Region::new(region.id()));
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        Self::from_client(Client::new(&sdk_config))
    }

    /// Wraps an already configured client, e.g. one with custom endpoints.
    pub fn from_client(inner_client: Client) -> Self {
        Self { inner_client }
    }
}

#[async_trait]
impl LogIngestion for AwsLogIngestion {
    async fn create_log_group(&self, group: &str) -> Result<(), IngestionError> {
        match self
            .inner_client
            .create_log_group()
            .log_group_name(group)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_resource_already_exists_exception()) =>
            {
                Err(IngestionError::AlreadyExists(group.to_string()))
            }
            Err(e) => Err(IngestionError::Service(DisplayErrorContext(&e).to_string())),
        }
    }

    async fn create_log_stream(&self, group: &str, stream: &str) -> Result<(), IngestionError> {
        match self
            .inner_client
            .create_log_stream()
            .log_group_name(group)
            .log_stream_name(stream)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_resource_already_exists_exception()) =>
            {
                Err(IngestionError::AlreadyExists(format!("{}/{}", group, stream)))
            }
            Err(e) => Err(IngestionError::Service(DisplayErrorContext(&e).to_string())),
        }
    }

    async fn put_log_events(
        &self,
        group: &str,
        stream: &str,
        events: Vec<RemoteLogEvent>,
    ) -> Result<(), IngestionError> {
        let log_events = events
            .into_iter()
            .map(|event| {
                InputLogEvent::builder()
                    .message(event.message)
                    .timestamp(event.timestamp_millis)
                    .build()
                    .map_err(|e| IngestionError::Service(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.inner_client
            .put_log_events()
            .log_group_name(group)
            .log_stream_name(stream)
            .set_log_events(Some(log_events))
            .send()
            .await
            .map_err(|e| IngestionError::Service(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}
