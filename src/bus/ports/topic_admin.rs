//! Administration port used to provision topics before consuming.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for topic administration.
pub type TopicAdminResult<T> = Result<T, TopicAdminError>;

/// Topic existence checks and creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicAdmin: Send + Sync {
    /// Returns `true` when the topic exists.
    async fn topic_exists(&self, name: &str) -> TopicAdminResult<bool>;

    /// Creates a topic.
    ///
    /// # Errors
    ///
    /// Returns [`TopicAdminError::AlreadyExists`] when the topic exists.
    async fn create_topic(&self, name: &str) -> TopicAdminResult<()>;
}

/// Errors returned by topic administrators.
#[derive(Debug, Clone, Error)]
pub enum TopicAdminError {
    /// The topic already exists.
    #[error("topic already exists: {0}")]
    AlreadyExists(String),

    /// Transport failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TopicAdminError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
