//! Central registry for digest algorithm implementations

use super::traits::{HashAlgorithmImpl, StreamingHasher};
use crate::error::ValidationError;
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Central registry for all digest algorithms
///
/// The registry is a stateless factory: accumulators it constructs share no
/// mutable state with each other, so concurrent lookups need no coordination
/// beyond the read lock.
pub struct AlgorithmRegistry {
    algorithms: RwLock<HashMap<String, Arc<dyn HashAlgorithmImpl>>>,
}

impl AlgorithmRegistry {
    /// Create a new empty registry
    fn new() -> Self {
        Self {
            algorithms: RwLock::new(HashMap::new()),
        }
    }

    /// Get the global registry instance
    pub fn global() -> &'static Self {
        static INSTANCE: OnceCell<AlgorithmRegistry> = OnceCell::new();
        INSTANCE.get_or_init(|| {
            let mut registry = Self::new();
            // Register all built-in algorithms
            super::algorithms::register_all(&mut registry);
            registry
        })
    }

    /// Register a new algorithm
    pub fn register(&mut self, algorithm: impl HashAlgorithmImpl + 'static) {
        let mut algorithms = self.algorithms.write().unwrap();
        let id = algorithm.id().to_string();
        algorithms.insert(id, Arc::new(algorithm));
    }

    /// Get algorithm by ID
    pub fn get(&self, id: &str) -> Option<Arc<dyn HashAlgorithmImpl>> {
        let algorithms = self.algorithms.read().unwrap();
        algorithms.get(id).cloned()
    }

    /// Construct a fresh accumulator for the given algorithm id
    pub fn construct(&self, id: &str) -> Result<Box<dyn StreamingHasher>> {
        self.get(id)
            .map(|algo| algo.create_hasher())
            .ok_or_else(|| Error::Validation(ValidationError::unsupported_algorithm(id)))
    }

    /// List all registered algorithm ids, sorted
    pub fn list(&self) -> Vec<String> {
        let algorithms = self.algorithms.read().unwrap();
        let mut ids: Vec<_> = algorithms.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_registry_has_all_builtins() {
        let registry = AlgorithmRegistry::global();

        for id in [
            "md5", "sha1", "sha224", "sha256", "sha384", "sha512", "sha3-256", "sha3-384",
            "sha3-512", "blake2b", "blake2s",
        ] {
            assert!(registry.get(id).is_some(), "missing algorithm: {id}");
        }
    }

    #[test]
    fn test_construct_unknown_algorithm() {
        let registry = AlgorithmRegistry::global();
        let result = registry.construct("whirlpool");

        assert!(matches!(
            result,
            Err(Error::Validation(
                ValidationError::UnsupportedAlgorithm { .. }
            ))
        ));
    }

    #[test]
    fn test_constructed_accumulators_are_independent() {
        let registry = AlgorithmRegistry::global();

        let mut first = registry.construct("sha256").unwrap();
        let second = registry.construct("sha256").unwrap();

        first.update(b"some data");

        // The second accumulator is unaffected by the first one's input
        assert_eq!(
            second.finalize(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_list_is_sorted() {
        let ids = AlgorithmRegistry::global().list();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 11);
    }
}
