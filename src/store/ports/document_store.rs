//! Gateway port for reading and mutating documents by collection and id.

use crate::store::domain::{Collection, Document};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store contract.
///
/// Implementations are shared by every concurrently running handler, so all
/// methods take `&self` and must be safe to call in parallel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document.
    ///
    /// Returns `None` when no document is stored under `id`.
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>>;

    /// Stores a new document only if none exists under `id`.
    ///
    /// The existence check and the write happen atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] when a document is already
    /// stored under `id`.
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        document: Document,
    ) -> StoreResult<()>;

    /// Stores a document, replacing any existing one.
    async fn set(&self, collection: Collection, id: &str, document: Document) -> StoreResult<()>;

    /// Merges `fields` into an existing document; fields not supplied are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the document does not exist.
    async fn update(&self, collection: Collection, id: &str, fields: Document) -> StoreResult<()>;

    /// Removes a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the document does not exist.
    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<()>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A document with the same identifier already exists.
    #[error("{collection} document '{id}' already exists")]
    AlreadyExists {
        /// Collection that was written.
        collection: Collection,
        /// Conflicting document identifier.
        id: String,
    },

    /// The document was not found.
    #[error("{collection} document '{id}' not found")]
    NotFound {
        /// Collection that was searched.
        collection: Collection,
        /// Missing document identifier.
        id: String,
    },

    /// A stored document could not be mapped to or from its record type.
    #[error("{collection} document '{id}' is corrupt: {reason}")]
    Corrupt {
        /// Collection holding the document.
        collection: Collection,
        /// Document identifier.
        id: String,
        /// Mapping failure description.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` when the target document does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
