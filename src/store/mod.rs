//! Document store gateway.
//!
//! Records for every entity kind live in a document store keyed by
//! collection and caller-supplied identifier. Handlers only see the
//! [`ports::DocumentStore`] contract; the storage engine itself is an
//! external collaborator.
//!
//! - Collection and document types in [`domain`]
//! - Port contract in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Typed record helpers in [`records`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod records;

pub use domain::{Collection, Document};
pub use ports::{DocumentStore, StoreError, StoreResult};
pub use records::Record;
