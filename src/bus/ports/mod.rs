//! Port contracts for bus interaction.
//!
//! Ports define the transport-agnostic capabilities the core depends on:
//! publishing responses, receiving and settling deliveries, and ensuring
//! topics exist.

pub mod publisher;
pub mod source;
pub mod topic_admin;

#[cfg(test)]
pub use publisher::MockResponsePublisher;
pub use publisher::{PublishError, PublishResult, ResponsePublisher};
#[cfg(test)]
pub use source::MockMessageSource;
pub use source::{MessageSource, SourceError, SourceResult};
#[cfg(test)]
pub use topic_admin::MockTopicAdmin;
pub use topic_admin::{TopicAdmin, TopicAdminError, TopicAdminResult};
