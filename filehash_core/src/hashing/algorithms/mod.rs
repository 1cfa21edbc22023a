//! Digest algorithm implementations

use super::registry::AlgorithmRegistry;

mod blake2;
mod md5;
mod sha1;
mod sha2;
mod sha3;

/// Register all built-in algorithms with the registry
pub(crate) fn register_all(registry: &mut AlgorithmRegistry) {
    registry.register(md5::Md5Algorithm);
    registry.register(sha1::Sha1Algorithm);
    registry.register(sha2::Sha224Algorithm);
    registry.register(sha2::Sha256Algorithm);
    registry.register(sha2::Sha384Algorithm);
    registry.register(sha2::Sha512Algorithm);
    registry.register(sha3::Sha3_256Algorithm);
    registry.register(sha3::Sha3_384Algorithm);
    registry.register(sha3::Sha3_512Algorithm);
    registry.register(blake2::Blake2bAlgorithm);
    registry.register(blake2::Blake2sAlgorithm);
}
