//! In-process bus built on tokio channels.
//!
//! Inbound deliveries queue on an unbounded channel drained by
//! [`MessageSource::receive`]; published responses are forwarded as
//! [`OutboundMessage`]s to the receiver returned by [`ChannelBus::new`].
//! Settlements are recorded but never trigger redelivery.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tracing::{debug, warn};

use crate::bus::{
    adapters::memory::InMemoryTopicAdmin,
    domain::{Acknowledgement, InboundMessage, MessageId, OutboundMessage, Response, Topic},
    ports::{
        MessageSource, PublishError, PublishResult, ResponsePublisher, SourceError, SourceResult,
        TopicAdmin, TopicAdminResult,
    },
};

/// Tokio-channel bus for tests and local runs.
#[derive(Debug)]
pub struct ChannelBus {
    inbound_tx: Mutex<Option<mpsc::UnboundedSender<InboundMessage>>>,
    inbound_rx: AsyncMutex<mpsc::UnboundedReceiver<InboundMessage>>,
    outbound_tx: mpsc::UnboundedSender<OutboundMessage>,
    settlements: Mutex<Vec<(MessageId, Acknowledgement)>>,
    topics: InMemoryTopicAdmin,
}

impl ChannelBus {
    /// Creates a bus and the receiver on which published responses arrive.
    ///
    /// The receiver yields `None` once every handle to the bus is dropped.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let bus = Self {
            inbound_tx: Mutex::new(Some(inbound_tx)),
            inbound_rx: AsyncMutex::new(inbound_rx),
            outbound_tx,
            settlements: Mutex::new(Vec::new()),
            topics: InMemoryTopicAdmin::new(),
        };
        (bus, outbound_rx)
    }

    /// Queues a delivery on `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Closed`] after [`ChannelBus::close`].
    pub fn submit(
        &self,
        topic: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> SourceResult<MessageId> {
        let message = InboundMessage::new(topic, payload);
        let id = message.id;
        let guard = self
            .inbound_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let sender = guard.as_ref().ok_or(SourceError::Closed)?;
        sender.send(message).map_err(|_| SourceError::Closed)?;
        Ok(id)
    }

    /// Stops accepting deliveries; queued deliveries are still received.
    pub fn close(&self) {
        self.inbound_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Returns every settlement in the order it happened.
    #[must_use]
    pub fn settlements(&self) -> Vec<(MessageId, Acknowledgement)> {
        self.settlements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MessageSource for ChannelBus {
    async fn receive(&self) -> SourceResult<Option<InboundMessage>> {
        Ok(self.inbound_rx.lock().await.recv().await)
    }

    async fn settle(&self, message: MessageId, acknowledgement: Acknowledgement) -> SourceResult<()> {
        if !acknowledgement.is_ack() {
            warn!(message_id = %message, "delivery nacked; the local bus does not redeliver");
        }
        self.settlements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message, acknowledgement));
        Ok(())
    }
}

#[async_trait]
impl ResponsePublisher for ChannelBus {
    async fn publish(&self, topic: Topic, response: &Response) -> PublishResult<()> {
        let payload = response.to_json()?;
        self.outbound_tx
            .send(OutboundMessage {
                topic: topic.response_name().to_owned(),
                payload,
            })
            .map_err(|err| PublishError::transport(std::io::Error::other(err.to_string())))?;
        debug!(topic = topic.response_name(), "response published");
        Ok(())
    }
}

#[async_trait]
impl TopicAdmin for ChannelBus {
    async fn topic_exists(&self, name: &str) -> TopicAdminResult<bool> {
        self.topics.topic_exists(name).await
    }

    async fn create_topic(&self, name: &str) -> TopicAdminResult<()> {
        self.topics.create_topic(name).await
    }
}
