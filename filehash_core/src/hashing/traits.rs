//! Core traits for the digest algorithm extensibility system

use std::sync::Arc;

/// Core trait that all digest algorithms must implement
pub trait HashAlgorithmImpl: Send + Sync {
    /// Unique identifier for this algorithm
    fn id(&self) -> &'static str;

    /// Display name for user interfaces
    fn display_name(&self) -> &'static str;

    /// Digest output size in bytes
    fn output_size(&self) -> usize;

    /// Create a new streaming hasher instance
    fn create_hasher(&self) -> Box<dyn StreamingHasher>;

    /// Calculate hash for in-memory data
    fn hash_bytes(&self, data: &[u8]) -> String;

    /// Estimated memory usage for hasher state
    fn memory_overhead(&self) -> usize {
        1024
    }
}

/// Trait for streaming digest calculation
///
/// An accumulator absorbs byte chunks in order and finalizes exactly once;
/// `finalize` consumes the box, so further input after finalization is
/// unrepresentable.
pub trait StreamingHasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash calculation and return the lowercase hex digest
    fn finalize(self: Box<Self>) -> String;
}

/// Extension trait for AlgorithmId to resolve its registry implementation
pub trait AlgorithmIdExt {
    /// Convert enum to trait implementation
    fn to_impl(&self) -> Arc<dyn HashAlgorithmImpl>;
}
