//! Unit tests for the bus module.

mod dispatcher_tests;
