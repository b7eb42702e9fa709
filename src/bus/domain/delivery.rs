//! Messages exchanged with the bus transport.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Transport-assigned identifier of an inbound delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random message identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A command delivered by the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Delivery identifier used to settle the message.
    pub id: MessageId,
    /// Topic the message was published on.
    pub topic: String,
    /// Raw UTF-8 JSON payload.
    pub payload: Vec<u8>,
}

impl InboundMessage {
    /// Creates a delivery with a fresh identifier.
    #[must_use]
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id: MessageId::new(),
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// A message handed to the bus for publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Destination topic name.
    pub topic: String,
    /// Raw UTF-8 JSON payload.
    pub payload: Vec<u8>,
}

/// How an inbound delivery is settled with the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Acknowledgement {
    /// Processing finished; the bus may forget the message. Business-level
    /// failures are acknowledged too.
    Ack,
    /// Processing failed on infrastructure; the bus should redeliver.
    Nack,
}

impl Acknowledgement {
    /// Returns `true` for [`Acknowledgement::Ack`].
    #[must_use]
    pub const fn is_ack(self) -> bool {
        matches!(self, Self::Ack)
    }
}
