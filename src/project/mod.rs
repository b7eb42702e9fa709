//! Project lifecycle: create, update and delete project records.
//!
//! A project's `members` set is what task assignment checks against. No
//! referential integrity is enforced between members and stored users.
//!
//! - Records and command schemas in [`domain`]
//! - Command handling in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
