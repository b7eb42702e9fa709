//! Application services for user command handling.

mod lifecycle;

pub use lifecycle::UserService;
