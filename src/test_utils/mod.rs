//! Helpers shared by unit and integration tests.
//!
//! Compiled for unit tests and behind the `test-util` feature. Provides the
//! error types and in-memory collaborators that several test modules need.

pub mod collecting_handler;
pub mod errors;
pub mod mock_server;
pub mod recording_sink;
