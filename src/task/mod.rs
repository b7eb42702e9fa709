//! Task lifecycle: creation, updates, member assignment and completion.
//!
//! Assignment requires the member to belong to the task's project and
//! completion requires the completer to be an assigned member. Tasks in a
//! terminal status refuse both.
//!
//! - Records, statuses and command schemas in [`domain`]
//! - Command handling in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
