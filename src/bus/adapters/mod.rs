//! Adapter implementations for bus ports.

pub mod channel;
pub mod memory;
pub mod stdio;

pub use channel::ChannelBus;
pub use memory::{InMemoryTopicAdmin, PublishedResponse, RecordingPublisher};
