//! Domain model for bus traffic.

mod delivery;
mod envelope;
mod error_code;
mod response;
mod topic;

pub use delivery::{Acknowledgement, InboundMessage, MessageId, OutboundMessage};
pub use envelope::CommandEnvelope;
pub use error_code::ErrorCode;
pub use response::{Response, ResponseData};
pub use topic::{Topic, UnknownTopicError};
