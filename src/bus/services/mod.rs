//! Orchestration on top of the bus ports.
//!
//! - [`Dispatcher`] routes one delivery to its entity handler
//! - [`Consumer`] drains a [`crate::bus::ports::MessageSource`] concurrently
//! - [`provision_topics`] makes sure every topic exists before consuming

mod consumer;
mod dispatcher;
mod provisioning;

pub use consumer::{Consumer, ConsumerStats};
pub use dispatcher::Dispatcher;
pub use provisioning::{ProvisionReport, provision_topics};
