//! Port contracts for document persistence.

pub mod document_store;

#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use document_store::{DocumentStore, StoreError, StoreResult};
