//! Message bus integration: topics, envelopes, the response publisher and
//! the dispatcher that routes inbound commands to entity handlers.
//!
//! Transport itself (delivery, redelivery, dead-lettering) belongs to the
//! external bus. This module only defines the contracts the core needs and
//! the orchestration on top of them:
//!
//! - Topic, envelope, response and delivery types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Dispatch, consumption and provisioning services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
