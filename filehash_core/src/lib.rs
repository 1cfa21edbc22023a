//! File Hashing Core Library
//!
//! Streaming multi-digest file hashing: each file is read once in bounded
//! chunks, every requested digest accumulator absorbs the same pass, and
//! batches of files are processed with per-file fault isolation, progress
//! notifications and cooperative cancellation.

pub mod batch;
pub mod cancel;
pub mod chunker;
pub mod engine;
pub mod error;
pub mod hashing;
pub mod progress;
pub mod source;
pub mod verify;

// Re-export main types
pub use batch::{BatchCoordinator, BatchResult, FileReport, ProcessingStatus};
pub use cancel::CancelFlag;
pub use chunker::ChunkedReader;
pub use engine::HashEngine;
pub use error::{Error, Result};
pub use hashing::{
    AlgorithmId, AlgorithmRegistry, HashAlgorithmImpl, HashResult, StreamingHasher, hash_bytes,
};
pub use progress::{NullProvider, ProgressProvider, ProgressUpdate, SharedProvider};
pub use source::FileSource;
pub use verify::{combined_digest, verify_digest};

use serde::{Deserialize, Serialize};

/// Default maximum file size: 1 GiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;
/// Default maximum number of files per batch
pub const DEFAULT_MAX_FILES: usize = 5;
/// Default maximum number of algorithms per request
pub const DEFAULT_MAX_ALGORITHMS: usize = 3;
/// Default streaming chunk size: 8 KiB
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Core hashing configuration
///
/// All limits are injected: the engine and coordinator never consult
/// process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasherConfig {
    /// Maximum file size in bytes, enforced against both the declared size
    /// and the bytes actually streamed
    pub max_file_size: u64,
    /// Maximum number of files per batch
    pub max_files: usize,
    /// Maximum number of algorithms per request
    pub max_algorithms: usize,
    /// Streaming chunk size in bytes
    pub chunk_size: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            max_algorithms: DEFAULT_MAX_ALGORITHMS,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl HasherConfig {
    /// Create a test configuration with small limits
    pub fn test() -> Self {
        Self {
            max_file_size: 1024 * 1024, // 1MB ceiling for tests
            max_files: 5,
            max_algorithms: 3,
            chunk_size: 1024, // 1KB chunks for faster tests
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HasherConfig::default();
        assert_eq!(config.max_file_size, 1024 * 1024 * 1024);
        assert_eq!(config.max_files, 5);
        assert_eq!(config.max_algorithms, 3);
        assert_eq!(config.chunk_size, 8192);
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = HasherConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: HasherConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.chunk_size, config.chunk_size);
        assert_eq!(restored.max_file_size, config.max_file_size);
    }
}
