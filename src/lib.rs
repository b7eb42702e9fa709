//! Skillsync command core.
//!
//! Consumes user, project and task lifecycle commands from a message bus,
//! applies them to a document store and publishes one correlated response
//! per command.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: records, command schemas and task rules with no I/O
//! - **Ports**: async traits for the document store, response publisher,
//!   message source and topic administration
//! - **Adapters**: in-memory and channel-backed implementations of the ports
//!
//! # Modules
//!
//! - [`bus`]: topics, envelopes, responses, dispatch and consumption
//! - [`user`], [`project`], [`task`]: per-entity command handlers
//! - [`store`]: document store port and typed record access
//! - [`validation`]: payload schema checking
//! - [`config`], [`telemetry`], [`health`]: process plumbing

pub mod bus;
pub mod config;
pub mod handler;
pub mod health;
pub mod project;
pub mod store;
pub mod task;
pub mod telemetry;
pub mod user;
pub mod validation;
