//! Shared world state for command flow BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use skillsync::{
    bus::{
        adapters::{PublishedResponse, RecordingPublisher},
        domain::{Acknowledgement, Topic},
        services::Dispatcher,
    },
    store::adapters::InMemoryDocumentStore,
};

/// Dispatcher type used by the BDD world.
pub type TestDispatcher = Dispatcher<InMemoryDocumentStore, RecordingPublisher, DefaultClock>;

/// Scenario world: a dispatcher over in-memory adapters.
pub struct CommandWorld {
    pub store: Arc<InMemoryDocumentStore>,
    pub publisher: Arc<RecordingPublisher>,
    pub dispatcher: TestDispatcher,
    pub sent: usize,
    pub last_acknowledgement: Option<Acknowledgement>,
}

impl CommandWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryDocumentStore::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let dispatcher = Dispatcher::new(
            Arc::clone(&store),
            Arc::clone(&publisher),
            Arc::new(DefaultClock),
        );
        Self {
            store,
            publisher,
            dispatcher,
            sent: 0,
            last_acknowledgement: None,
        }
    }

    /// Returns a fresh correlation key.
    pub fn next_correlation_key(&mut self) -> String {
        self.sent += 1;
        format!("corr-{}", self.sent)
    }

    /// Dispatches `payload` on `topic` and returns the response it produced.
    pub fn send(
        &mut self,
        topic: Topic,
        payload: &Value,
    ) -> Result<PublishedResponse, eyre::Report> {
        let bytes = serde_json::to_vec(payload)?;
        let acknowledgement = run_async(self.dispatcher.dispatch(topic.request_name(), &bytes));
        self.last_acknowledgement = Some(acknowledgement);
        let published = self
            .publisher
            .last()
            .ok_or_else(|| eyre::eyre!("no response published for {topic}"))?;
        if published.topic != topic {
            return Err(eyre::eyre!(
                "response for {topic} published on {}",
                published.topic
            ));
        }
        Ok(published)
    }

    /// Returns the most recent response.
    pub fn last_response(&self) -> Result<PublishedResponse, eyre::Report> {
        self.publisher
            .last()
            .ok_or_else(|| eyre::eyre!("no response has been published"))
    }
}

impl Default for CommandWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CommandWorld {
    CommandWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
