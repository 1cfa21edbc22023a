//! Progress reporting abstractions for the hashing core
//!
//! This module provides a trait-based abstraction for progress reporting,
//! allowing the core library to report progress without depending on
//! specific channel implementations or UI concerns. Notifications are
//! fire-and-forget: providers must not block, and the digest computation
//! path never depends on them.

use crate::batch::ProcessingStatus;
use std::sync::Arc;

/// Core trait for progress reporting
///
/// This trait abstracts away the progress reporting mechanism,
/// allowing different implementations (channels, logging, null, etc.)
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Create a child provider for nested operations
    fn create_child(&self, name: &str) -> Box<dyn ProgressProvider>;

    /// Signal that the operation is complete
    fn complete(&self);
}

/// Unified progress update type
#[derive(Debug, Clone)]
pub enum ProgressUpdate {
    /// Per-chunk streaming progress for one file
    ChunkProgress {
        file: String,
        bytes_processed: u64,
        bytes_total: u64,
    },

    /// A file's computation has begun
    FileStarted { file: String, bytes_total: u64 },

    /// A file's computation has finished (successfully or not)
    FileCompleted {
        file: String,
        status: ProcessingStatus,
    },

    /// Whole-batch progress
    BatchProgress { current: usize, total: usize },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {
        // No-op: discard all progress updates
    }

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        Box::new(NullProvider)
    }

    fn complete(&self) {
        // No-op
    }
}

/// Arc-wrapped provider for easy sharing across async tasks
pub struct SharedProvider {
    inner: Arc<dyn ProgressProvider>,
}

impl SharedProvider {
    /// Create a new shared provider wrapping the given provider
    pub fn new(provider: Arc<dyn ProgressProvider>) -> Self {
        Self { inner: provider }
    }
}

impl ProgressProvider for SharedProvider {
    fn report(&self, update: ProgressUpdate) {
        self.inner.report(update);
    }

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        Box::new(SharedProvider {
            inner: Arc::clone(&self.inner),
        })
    }

    fn complete(&self) {
        self.inner.complete();
    }
}

/// Helper functions for creating providers
impl dyn ProgressProvider {
    /// Create a null provider (useful for tests and when progress isn't needed)
    pub fn null() -> Box<dyn ProgressProvider> {
        Box::new(NullProvider)
    }
}
