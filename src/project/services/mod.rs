//! Command handling for the `project.*` topics.

mod lifecycle;

pub use lifecycle::ProjectService;
