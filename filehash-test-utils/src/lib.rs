//! Test utilities for the file hashing workspace
//!
//! This crate provides mock implementations, test builders, and fixtures
//! for testing hashing functionality.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::TestFileBuilder;
pub use mocks::{CountingReader, FailingReader, RecordingProvider};
