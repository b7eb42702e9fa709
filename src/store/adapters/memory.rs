//! In-memory document store for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::store::{
    domain::{Collection, Document},
    ports::{DocumentStore, StoreError, StoreResult},
};

/// Thread-safe in-memory document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    collections: HashMap<Collection, HashMap<String, Document>>,
}

impl InMemoryStoreState {
    fn documents(&self, collection: Collection) -> Option<&HashMap<String, Document>> {
        self.collections.get(&collection)
    }

    fn documents_mut(&mut self, collection: Collection) -> &mut HashMap<String, Document> {
        self.collections.entry(collection).or_default()
    }
}

impl InMemoryDocumentStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents stored in `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the state lock is poisoned.
    pub fn count(&self, collection: Collection) -> StoreResult<usize> {
        let state = self.read()?;
        Ok(state.documents(collection).map_or(0, HashMap::len))
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, InMemoryStoreState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn not_found(collection: Collection, id: &str) -> StoreError {
    StoreError::NotFound {
        collection,
        id: id.to_owned(),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>> {
        let state = self.read()?;
        Ok(state
            .documents(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn create(
        &self,
        collection: Collection,
        id: &str,
        document: Document,
    ) -> StoreResult<()> {
        let mut state = self.write()?;
        let documents = state.documents_mut(collection);
        if documents.contains_key(id) {
            return Err(StoreError::AlreadyExists {
                collection,
                id: id.to_owned(),
            });
        }
        documents.insert(id.to_owned(), document);
        Ok(())
    }

    async fn set(&self, collection: Collection, id: &str, document: Document) -> StoreResult<()> {
        let mut state = self.write()?;
        state.documents_mut(collection).insert(id.to_owned(), document);
        Ok(())
    }

    async fn update(&self, collection: Collection, id: &str, fields: Document) -> StoreResult<()> {
        let mut state = self.write()?;
        let existing = state
            .documents_mut(collection)
            .get_mut(id)
            .ok_or_else(|| not_found(collection, id))?;
        existing.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<()> {
        let mut state = self.write()?;
        state
            .documents_mut(collection)
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(collection, id))
    }
}
