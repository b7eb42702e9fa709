//! User lifecycle: create, update and delete user records.
//!
//! Users carry no cross-entity rules; the handler only enforces existence
//! and non-existence before mutating the `users` collection.
//!
//! - Records and command schemas in [`domain`]
//! - Command handling in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
