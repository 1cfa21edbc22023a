//! SHA-3 family digest algorithm implementations
//!
//! Covers SHA3-256, SHA3-384 and SHA3-512, backed by the `sha3` crate.

use crate::hashing::traits::{HashAlgorithmImpl, StreamingHasher};
use sha3::digest::generic_array::ArrayLength;
use sha3::digest::OutputSizeUser;
use sha3::{Digest as Sha3Digest, Sha3_256, Sha3_384, Sha3_512};
use std::ops::Add;

/// Generic streaming hasher over any SHA-3 variant
struct Sha3StreamingHasher<D: Sha3Digest + Send> {
    hasher: D,
}

impl<D> StreamingHasher for Sha3StreamingHasher<D>
where
    D: Sha3Digest + Send,
    <D as OutputSizeUser>::OutputSize: Add,
    <<D as OutputSizeUser>::OutputSize as Add>::Output: ArrayLength<u8>,
{
    fn update(&mut self, data: &[u8]) {
        Sha3Digest::update(&mut self.hasher, data);
    }

    fn finalize(self: Box<Self>) -> String {
        format!("{:x}", Sha3Digest::finalize(self.hasher))
    }
}

pub struct Sha3_256Algorithm;

impl HashAlgorithmImpl for Sha3_256Algorithm {
    fn id(&self) -> &'static str {
        "sha3-256"
    }

    fn display_name(&self) -> &'static str {
        "SHA3-256"
    }

    fn output_size(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Sha3StreamingHasher {
            hasher: Sha3_256::new(),
        })
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

pub struct Sha3_384Algorithm;

impl HashAlgorithmImpl for Sha3_384Algorithm {
    fn id(&self) -> &'static str {
        "sha3-384"
    }

    fn display_name(&self) -> &'static str {
        "SHA3-384"
    }

    fn output_size(&self) -> usize {
        48
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Sha3StreamingHasher {
            hasher: Sha3_384::new(),
        })
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

pub struct Sha3_512Algorithm;

impl HashAlgorithmImpl for Sha3_512Algorithm {
    fn id(&self) -> &'static str {
        "sha3-512"
    }

    fn display_name(&self) -> &'static str {
        "SHA3-512"
    }

    fn output_size(&self) -> usize {
        64
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Sha3StreamingHasher {
            hasher: Sha3_512::new(),
        })
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}
