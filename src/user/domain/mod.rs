//! Domain model for users.

mod command;
mod record;

pub use command::{CreateUserCommand, UpdateUserCommand, UserPatch};
pub use record::UserRecord;
