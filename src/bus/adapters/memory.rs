//! In-memory publisher and topic administrator for tests.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use crate::bus::{
    domain::{Response, Topic},
    ports::{
        PublishError, PublishResult, ResponsePublisher, TopicAdmin, TopicAdminError,
        TopicAdminResult,
    },
};

/// A response captured by [`RecordingPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedResponse {
    /// Command topic the response answers.
    pub topic: Topic,
    /// The published response.
    pub response: Response,
}

/// Publisher that records every response instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    published: Arc<RwLock<Vec<PublishedResponse>>>,
}

impl RecordingPublisher {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded response in publish order.
    #[must_use]
    pub fn published(&self) -> Vec<PublishedResponse> {
        self.published
            .read()
            .map(|published| published.clone())
            .unwrap_or_default()
    }

    /// Returns the most recent response.
    #[must_use]
    pub fn last(&self) -> Option<PublishedResponse> {
        self.published
            .read()
            .ok()
            .and_then(|published| published.last().cloned())
    }

    /// Returns the responses carrying `correlation_key`.
    #[must_use]
    pub fn for_correlation(&self, correlation_key: &str) -> Vec<PublishedResponse> {
        self.published()
            .into_iter()
            .filter(|entry| entry.response.correlation_key == correlation_key)
            .collect()
    }
}

#[async_trait]
impl ResponsePublisher for RecordingPublisher {
    async fn publish(&self, topic: Topic, response: &Response) -> PublishResult<()> {
        let mut published = self
            .published
            .write()
            .map_err(|err| PublishError::transport(std::io::Error::other(err.to_string())))?;
        published.push(PublishedResponse {
            topic,
            response: response.clone(),
        });
        Ok(())
    }
}

/// Topic administrator backed by an in-memory set of names.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTopicAdmin {
    topics: Arc<RwLock<BTreeSet<String>>>,
}

impl InMemoryTopicAdmin {
    /// Creates an administrator with no topics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an administrator with pre-existing topics.
    #[must_use]
    pub fn with_topics(topics: impl IntoIterator<Item = String>) -> Self {
        Self {
            topics: Arc::new(RwLock::new(topics.into_iter().collect())),
        }
    }

    /// Returns the known topic names in sorted order.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        self.topics
            .read()
            .map(|topics| topics.iter().cloned().collect())
            .unwrap_or_default()
    }
}

fn poisoned(err: impl ToString) -> TopicAdminError {
    TopicAdminError::transport(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TopicAdmin for InMemoryTopicAdmin {
    async fn topic_exists(&self, name: &str) -> TopicAdminResult<bool> {
        let topics = self.topics.read().map_err(poisoned)?;
        Ok(topics.contains(name))
    }

    async fn create_topic(&self, name: &str) -> TopicAdminResult<()> {
        let mut topics = self.topics.write().map_err(poisoned)?;
        if !topics.insert(name.to_owned()) {
            return Err(TopicAdminError::AlreadyExists(name.to_owned()));
        }
        Ok(())
    }
}
