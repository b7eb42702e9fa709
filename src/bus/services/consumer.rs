//! Concurrent consumption of a message source.

use super::Dispatcher;
use crate::{
    bus::{
        domain::Acknowledgement,
        ports::{MessageSource, ResponsePublisher, SourceError, SourceResult},
    },
    store::DocumentStore,
};
use mockable::Clock;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

/// Settlement counts reported when a [`Consumer`] stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    /// Deliveries acknowledged.
    pub acked: usize,
    /// Deliveries negatively acknowledged.
    pub nacked: usize,
    /// Deliveries whose settlement or processing task failed.
    pub failed: usize,
}

impl ConsumerStats {
    /// Total deliveries processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.acked + self.nacked + self.failed
    }

    fn record(&mut self, outcome: Result<SourceResult<Acknowledgement>, JoinError>) {
        match outcome {
            Ok(Ok(Acknowledgement::Ack)) => self.acked += 1,
            Ok(Ok(Acknowledgement::Nack)) => self.nacked += 1,
            Ok(Err(err)) => {
                warn!(error = %err, "failed to settle delivery");
                self.failed += 1;
            }
            Err(err) => {
                error!(error = %err, "delivery task aborted");
                self.failed += 1;
            }
        }
    }
}

/// Pulls deliveries from a source and dispatches each on its own task.
///
/// No ordering is imposed between deliveries, including deliveries for the
/// same entity.
pub struct Consumer<M, S, P, C>
where
    M: MessageSource,
    S: DocumentStore,
    P: ResponsePublisher,
    C: Clock + Send + Sync,
{
    source: Arc<M>,
    dispatcher: Arc<Dispatcher<S, P, C>>,
}

impl<M, S, P, C> Consumer<M, S, P, C>
where
    M: MessageSource + 'static,
    S: DocumentStore + 'static,
    P: ResponsePublisher + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a consumer.
    #[must_use]
    pub const fn new(source: Arc<M>, dispatcher: Arc<Dispatcher<S, P, C>>) -> Self {
        Self { source, dispatcher }
    }

    /// Consumes until the source reports it is drained, then waits for
    /// in-flight deliveries.
    ///
    /// # Errors
    ///
    /// Returns the [`SourceError`] that stopped receiving. In-flight
    /// deliveries are still awaited first.
    pub async fn run(&self) -> SourceResult<ConsumerStats> {
        let mut stats = ConsumerStats::default();
        let mut in_flight = JoinSet::new();
        let stopped = loop {
            let message = match self.source.receive().await {
                Ok(Some(message)) => message,
                Ok(None) | Err(SourceError::Closed) => break None,
                Err(err) => break Some(err),
            };
            debug!(message_id = %message.id, topic = %message.topic, "delivery received");
            let source = Arc::clone(&self.source);
            let dispatcher = Arc::clone(&self.dispatcher);
            in_flight.spawn(async move {
                let acknowledgement = dispatcher.dispatch(&message.topic, &message.payload).await;
                source
                    .settle(message.id, acknowledgement)
                    .await
                    .map(|()| acknowledgement)
            });
            while let Some(outcome) = in_flight.try_join_next() {
                stats.record(outcome);
            }
        };
        while let Some(outcome) = in_flight.join_next().await {
            stats.record(outcome);
        }
        info!(
            acked = stats.acked,
            nacked = stats.nacked,
            failed = stats.failed,
            "consumer stopped"
        );
        stopped.map_or(Ok(stats), Err)
    }
}
