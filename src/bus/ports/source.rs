//! Subscription port for inbound deliveries.

use crate::bus::domain::{Acknowledgement, InboundMessage, MessageId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for message source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Source of inbound command deliveries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Waits for the next delivery.
    ///
    /// Returns `None` once the subscription is closed and drained.
    async fn receive(&self) -> SourceResult<Option<InboundMessage>>;

    /// Settles a delivery. A [`Acknowledgement::Nack`] hands the message
    /// back to the bus for redelivery.
    async fn settle(&self, message: MessageId, acknowledgement: Acknowledgement) -> SourceResult<()>;
}

/// Errors returned by message sources.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The subscription is closed and accepts no more messages.
    #[error("subscription closed")]
    Closed,

    /// Transport failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
