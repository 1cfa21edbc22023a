//! Digest calculation functionality for the file hashing core library
//!
//! This module contains the algorithm identifier enum, the per-computation
//! result record and the trait-based algorithm registry.

use crate::error::ValidationError;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

// Trait system modules
mod algorithms;
mod registry;
mod traits;

// Re-export public types from the trait system
pub use registry::AlgorithmRegistry;
pub use traits::{AlgorithmIdExt, HashAlgorithmImpl, StreamingHasher};

/// Digest algorithms supported by the engine
///
/// A closed set: extending it means adding an enum variant plus a registry
/// entry under `algorithms/`, with no change to the engine or the batch
/// coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlgorithmId {
    /// MD5 digest algorithm
    MD5,
    /// SHA-1 digest algorithm
    SHA1,
    /// SHA-224 digest algorithm
    SHA224,
    /// SHA-256 digest algorithm
    SHA256,
    /// SHA-384 digest algorithm
    SHA384,
    /// SHA-512 digest algorithm
    SHA512,
    /// SHA3-256 digest algorithm
    SHA3_256,
    /// SHA3-384 digest algorithm
    SHA3_384,
    /// SHA3-512 digest algorithm
    SHA3_512,
    /// BLAKE2b-512 digest algorithm
    Blake2b,
    /// BLAKE2s-256 digest algorithm
    Blake2s,
}

impl AlgorithmId {
    /// All supported algorithms, in canonical order
    pub const ALL: [AlgorithmId; 11] = [
        AlgorithmId::MD5,
        AlgorithmId::SHA1,
        AlgorithmId::SHA224,
        AlgorithmId::SHA256,
        AlgorithmId::SHA384,
        AlgorithmId::SHA512,
        AlgorithmId::SHA3_256,
        AlgorithmId::SHA3_384,
        AlgorithmId::SHA3_512,
        AlgorithmId::Blake2b,
        AlgorithmId::Blake2s,
    ];

    /// Human-facing display name
    pub fn display_name(&self) -> &'static str {
        self.to_impl().display_name()
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmId::MD5 => write!(f, "md5"),
            AlgorithmId::SHA1 => write!(f, "sha1"),
            AlgorithmId::SHA224 => write!(f, "sha224"),
            AlgorithmId::SHA256 => write!(f, "sha256"),
            AlgorithmId::SHA384 => write!(f, "sha384"),
            AlgorithmId::SHA512 => write!(f, "sha512"),
            AlgorithmId::SHA3_256 => write!(f, "sha3-256"),
            AlgorithmId::SHA3_384 => write!(f, "sha3-384"),
            AlgorithmId::SHA3_512 => write!(f, "sha3-512"),
            AlgorithmId::Blake2b => write!(f, "blake2b"),
            AlgorithmId::Blake2s => write!(f, "blake2s"),
        }
    }
}

impl std::str::FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(AlgorithmId::MD5),
            "sha1" | "sha-1" => Ok(AlgorithmId::SHA1),
            "sha224" | "sha-224" => Ok(AlgorithmId::SHA224),
            "sha256" | "sha-256" => Ok(AlgorithmId::SHA256),
            "sha384" | "sha-384" => Ok(AlgorithmId::SHA384),
            "sha512" | "sha-512" => Ok(AlgorithmId::SHA512),
            "sha3-256" => Ok(AlgorithmId::SHA3_256),
            "sha3-384" => Ok(AlgorithmId::SHA3_384),
            "sha3-512" => Ok(AlgorithmId::SHA3_512),
            "blake2b" | "blake2b-512" => Ok(AlgorithmId::Blake2b),
            "blake2s" | "blake2s-256" => Ok(AlgorithmId::Blake2s),
            _ => Err(Error::Validation(ValidationError::unsupported_algorithm(s))),
        }
    }
}

impl AlgorithmIdExt for AlgorithmId {
    fn to_impl(&self) -> Arc<dyn HashAlgorithmImpl> {
        AlgorithmRegistry::global()
            .get(&self.to_string())
            .expect("Algorithm should be registered")
    }
}

/// Calculate a digest for in-memory data
pub fn hash_bytes(algorithm: AlgorithmId, data: &[u8]) -> String {
    algorithm.to_impl().hash_bytes(data)
}

/// Result of one (file, algorithm) digest computation
///
/// Immutable once created. The digest is present exactly when the error is
/// absent; the recorded duration covers the whole per-file operation, not
/// this algorithm alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashResult {
    pub algorithm: AlgorithmId,
    /// Lowercase hex digest, `None` when the computation failed
    pub digest: Option<String>,
    pub file_name: String,
    pub file_size: u64,
    pub duration: Duration,
    /// Error detail, `None` when the computation succeeded
    pub error: Option<String>,
}

impl HashResult {
    /// Build a successful result
    pub fn success(
        algorithm: AlgorithmId,
        digest: String,
        file_name: &str,
        file_size: u64,
        duration: Duration,
    ) -> Self {
        Self {
            algorithm,
            digest: Some(digest),
            file_name: file_name.to_string(),
            file_size,
            duration,
            error: None,
        }
    }

    /// Build a failed result carrying the error detail
    pub fn failure(
        algorithm: AlgorithmId,
        file_name: &str,
        file_size: u64,
        duration: Duration,
        error: &str,
    ) -> Self {
        Self {
            algorithm,
            digest: None,
            file_name: file_name.to_string(),
            file_size,
            duration,
            error: Some(error.to_string()),
        }
    }

    /// Whether the computation succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
