//! Step definitions for the task assignment feature.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
