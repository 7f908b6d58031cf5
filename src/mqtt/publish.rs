//! Will publish messages and the publish service the scheduler submits them to.

use super::protocol::Qos;
use super::session::ClientSessionWill;
use futures::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

/// Application message built from a stored will.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WillPublish {
    pub topic: String,
    pub payload: Vec<u8>,
    pub qos: Qos,
    pub retain: bool,
    pub origin_node_id: String,
    pub message_expiry_interval: Option<u32>,
    pub payload_format_indicator: Option<u8>,
    pub content_type: Option<String>,
    pub response_topic: Option<String>,
    pub correlation_data: Option<Vec<u8>>,
    pub user_properties: Vec<(String, String)>,
}

impl WillPublish {
    /// Build the publish, passing will content through unchanged.
    pub fn from_will(will: &ClientSessionWill) -> Self {
        let props = &will.properties;
        Self {
            topic: will.topic.clone(),
            payload: will.payload.clone(),
            qos: will.qos,
            retain: will.retain,
            origin_node_id: will.origin_node_id.clone(),
            message_expiry_interval: props.message_expiry_interval,
            payload_format_indicator: props.payload_format_indicator,
            content_type: props.content_type.clone(),
            response_topic: props.response_topic.clone(),
            correlation_data: props.correlation_data.clone(),
            user_properties: props.user_properties.clone(),
        }
    }
}

/// Outcome reported by the publish service once delivery settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    Delivered,
    NoMatchingSubscribers,
}

#[derive(Debug, Clone, Error)]
pub enum PublishError {
    #[error("publish rejected: {0}")]
    Rejected(String),
    #[error("publish service unavailable")]
    Unavailable,
}

/// Broker publish path used for will delivery.
///
/// Calling `publish` is the submission; the returned future only reports the
/// outcome and is driven by the caller's executor.
pub trait PublishService: Send + Sync {
    fn publish(
        &self,
        publish: WillPublish,
        client_id: &str,
    ) -> BoxFuture<'static, Result<PublishStatus, PublishError>>;
}

/// Publish service that writes wills to the log and acknowledges them.
#[derive(Debug, Clone, Default)]
pub struct LoggingPublisher;

impl PublishService for LoggingPublisher {
    fn publish(
        &self,
        publish: WillPublish,
        client_id: &str,
    ) -> BoxFuture<'static, Result<PublishStatus, PublishError>> {
        tracing::info!(
            client_id,
            topic = %publish.topic,
            qos = publish.qos.level(),
            retain = publish.retain,
            payload_len = publish.payload.len(),
            "will published"
        );
        future::ready(Ok(PublishStatus::Delivered)).boxed()
    }
}
