//! SHA-2 family digest algorithm implementations
//!
//! Covers SHA-224, SHA-256, SHA-384 and SHA-512. Each variant gets its own
//! registry entry backed by the `sha2` crate.

use crate::hashing::traits::{HashAlgorithmImpl, StreamingHasher};
use sha2::digest::generic_array::ArrayLength;
use sha2::digest::OutputSizeUser;
use sha2::{Digest as Sha2Digest, Sha224, Sha256, Sha384, Sha512};
use std::ops::Add;

/// Generic streaming hasher over any SHA-2 variant
struct Sha2StreamingHasher<D: Sha2Digest + Send> {
    hasher: D,
}

impl<D> StreamingHasher for Sha2StreamingHasher<D>
where
    D: Sha2Digest + Send,
    <D as OutputSizeUser>::OutputSize: Add,
    <<D as OutputSizeUser>::OutputSize as Add>::Output: ArrayLength<u8>,
{
    fn update(&mut self, data: &[u8]) {
        Sha2Digest::update(&mut self.hasher, data);
    }

    fn finalize(self: Box<Self>) -> String {
        format!("{:x}", Sha2Digest::finalize(self.hasher))
    }
}

pub struct Sha224Algorithm;

impl HashAlgorithmImpl for Sha224Algorithm {
    fn id(&self) -> &'static str {
        "sha224"
    }

    fn display_name(&self) -> &'static str {
        "SHA-224"
    }

    fn output_size(&self) -> usize {
        28
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Sha2StreamingHasher {
            hasher: Sha224::new(),
        })
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

pub struct Sha256Algorithm;

impl HashAlgorithmImpl for Sha256Algorithm {
    fn id(&self) -> &'static str {
        "sha256"
    }

    fn display_name(&self) -> &'static str {
        "SHA-256"
    }

    fn output_size(&self) -> usize {
        32
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Sha2StreamingHasher {
            hasher: Sha256::new(),
        })
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

pub struct Sha384Algorithm;

impl HashAlgorithmImpl for Sha384Algorithm {
    fn id(&self) -> &'static str {
        "sha384"
    }

    fn display_name(&self) -> &'static str {
        "SHA-384"
    }

    fn output_size(&self) -> usize {
        48
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Sha2StreamingHasher {
            hasher: Sha384::new(),
        })
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

pub struct Sha512Algorithm;

impl HashAlgorithmImpl for Sha512Algorithm {
    fn id(&self) -> &'static str {
        "sha512"
    }

    fn display_name(&self) -> &'static str {
        "SHA-512"
    }

    fn output_size(&self) -> usize {
        64
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Sha2StreamingHasher {
            hasher: Sha512::new(),
        })
    }

    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}
