//! Command handling for the `task.*` topics.

mod lifecycle;
mod progress;

pub use lifecycle::TaskService;
