//! Typed access to stored documents.
//!
//! Entity records are plain serde structs. These helpers convert between
//! records and raw [`Document`] values and report mapping failures as
//! [`StoreError::Corrupt`].

use crate::store::{
    domain::{Collection, Document},
    ports::{DocumentStore, StoreError, StoreResult},
};
use serde::{Serialize, de::DeserializeOwned};

/// An entity record stored in a fixed collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    /// Collection holding records of this kind.
    const COLLECTION: Collection;

    /// Returns the record identifier.
    fn id(&self) -> &str;
}

/// Serializes a value into a document.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] when the value does not serialize to a
/// JSON object.
pub fn to_document<T: Serialize>(
    collection: Collection,
    id: &str,
    value: &T,
) -> StoreResult<Document> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(document)) => Ok(document),
        Ok(other) => Err(corrupt(
            collection,
            id,
            format!("expected an object, found {other}"),
        )),
        Err(err) => Err(corrupt(collection, id, err.to_string())),
    }
}

/// Reads and deserializes a record.
///
/// Returns `None` when the record does not exist.
///
/// # Errors
///
/// Returns the store error, or [`StoreError::Corrupt`] when the stored
/// document does not match the record shape.
pub async fn fetch<R, S>(store: &S, id: &str) -> StoreResult<Option<R>>
where
    R: Record,
    S: DocumentStore + ?Sized,
{
    let Some(document) = store.get(R::COLLECTION, id).await? else {
        return Ok(None);
    };
    serde_json::from_value(serde_json::Value::Object(document))
        .map(Some)
        .map_err(|err| corrupt(R::COLLECTION, id, err.to_string()))
}

/// Stores a new record if none exists under its identifier.
///
/// # Errors
///
/// Returns [`StoreError::AlreadyExists`] when the identifier is taken.
pub async fn insert<R, S>(store: &S, record: &R) -> StoreResult<()>
where
    R: Record,
    S: DocumentStore + ?Sized,
{
    let document = to_document(R::COLLECTION, record.id(), record)?;
    store.create(R::COLLECTION, record.id(), document).await
}

/// Merges a serializable patch into an existing record.
///
/// Only fields present in the serialized patch are written.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] when the record does not exist.
pub async fn merge<R, S, T>(store: &S, id: &str, patch: &T) -> StoreResult<()>
where
    R: Record,
    S: DocumentStore + ?Sized,
    T: Serialize + Sync,
{
    let fields = to_document(R::COLLECTION, id, patch)?;
    store.update(R::COLLECTION, id, fields).await
}

/// Removes a record.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] when the record does not exist.
pub async fn remove<R, S>(store: &S, id: &str) -> StoreResult<()>
where
    R: Record,
    S: DocumentStore + ?Sized,
{
    store.delete(R::COLLECTION, id).await
}

fn corrupt(collection: Collection, id: &str, reason: String) -> StoreError {
    StoreError::Corrupt {
        collection,
        id: id.to_owned(),
        reason,
    }
}
