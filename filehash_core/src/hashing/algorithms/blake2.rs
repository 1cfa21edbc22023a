//! BLAKE2 family digest algorithm implementations
//!
//! Covers BLAKE2b-512 and BLAKE2s-256, backed by the `blake2` crate.

use crate::hashing::traits::{HashAlgorithmImpl, StreamingHasher};
use blake2::{Blake2b512, Blake2s256, Digest as Blake2Digest};

/// BLAKE2b-512 streaming hasher
struct Blake2bStreamingHasher {
    hasher: Blake2b512,
}

impl StreamingHasher for Blake2bStreamingHasher {
    fn update(&mut self, data: &[u8]) {
        Blake2Digest::update(&mut self.hasher, data);
    }

    fn finalize(self: Box<Self>) -> String {
        format!("{:x}", Blake2Digest::finalize(self.hasher))
    }
}

pub struct Blake2bAlgorithm;

impl HashAlgorithmImpl for Blake2bAlgorithm {
    fn id(&self) -> &'static str {
        "blake2b"
    }

    fn display_name(&self) -> &'static str {
        "BLAKE2b"
    }

    fn output_size(&self) -> usize {
        64
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Blake2bStreamingHasher {
            hasher: Blake2b512::new(),
        })
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

/// BLAKE2s-256 streaming hasher
struct Blake2sStreamingHasher {
    hasher: Blake2s256,
}

impl StreamingHasher for Blake2sStreamingHasher {
    fn update(&mut self, data: &[u8]) {
        Blake2Digest::update(&mut self.hasher, data);
    }

    fn finalize(self: Box<Self>) -> String {
        format!("{:x}", Blake2Digest::finalize(self.hasher))
    }
}

pub struct Blake2sAlgorithm;

impl HashAlgorithmImpl for Blake2sAlgorithm {
    fn id(&self) -> &'static str {
        "blake2s"
    }

    fn display_name(&self) -> &'static str {
        "BLAKE2s"
    }

    fn output_size(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Blake2sStreamingHasher {
            hasher: Blake2s256::new(),
        })
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}
