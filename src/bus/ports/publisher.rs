//! Publisher port for command outcomes.

use crate::bus::domain::{Response, Topic};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Emits one response message on the response topic of a command.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResponsePublisher: Send + Sync {
    /// Publishes `response` on `topic`'s response topic.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the response cannot be encoded or the
    /// transport rejects it.
    async fn publish(&self, topic: Topic, response: &Response) -> PublishResult<()>;
}

/// Errors returned by response publishers.
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// The response could not be encoded.
    #[error("failed to encode response: {0}")]
    Encoding(Arc<serde_json::Error>),

    /// The transport rejected or dropped the message.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl PublishError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

impl From<serde_json::Error> for PublishError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(Arc::new(err))
    }
}
