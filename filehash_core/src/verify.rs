//! Digest verification and combination helpers

use crate::hashing::{AlgorithmId, HashResult, hash_bytes};
use std::collections::HashMap;

/// Compare a computed digest against an expected value
///
/// Hex digests compare case-insensitively; surrounding whitespace on the
/// expected value (pasted from a checksum file, say) is ignored.
pub fn verify_digest(expected: &str, actual: &str) -> bool {
    expected.trim().eq_ignore_ascii_case(actual.trim())
}

/// Combine a multi-algorithm result set into a single digest
///
/// The individual hex digests are concatenated in canonical algorithm-id
/// order and the concatenation is hashed with `algorithm`. Returns `None`
/// when fewer than two successful digests are available, where a combined
/// value adds nothing.
pub fn combined_digest(
    results: &HashMap<AlgorithmId, HashResult>,
    algorithm: AlgorithmId,
) -> Option<String> {
    let mut successful: Vec<(String, &str)> = results
        .iter()
        .filter_map(|(id, result)| result.digest.as_deref().map(|d| (id.to_string(), d)))
        .collect();

    if successful.len() <= 1 {
        return None;
    }

    successful.sort_by(|a, b| a.0.cmp(&b.0));

    let concatenated: String = successful.into_iter().map(|(_, digest)| digest).collect();
    Some(hash_bytes(algorithm, concatenated.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn success(algorithm: AlgorithmId, digest: &str) -> HashResult {
        HashResult::success(
            algorithm,
            digest.to_string(),
            "test.bin",
            4,
            Duration::from_millis(1),
        )
    }

    #[test]
    fn test_verify_digest_case_insensitive() {
        assert!(verify_digest(
            "D41D8CD98F00B204E9800998ECF8427E",
            "d41d8cd98f00b204e9800998ecf8427e"
        ));
    }

    #[test]
    fn test_verify_digest_trims_whitespace() {
        assert!(verify_digest(
            "  d41d8cd98f00b204e9800998ecf8427e\n",
            "d41d8cd98f00b204e9800998ecf8427e"
        ));
    }

    #[test]
    fn test_verify_digest_mismatch() {
        assert!(!verify_digest("deadbeef", "cafebabe"));
    }

    #[test]
    fn test_combined_digest_requires_two() {
        let mut results = HashMap::new();
        results.insert(AlgorithmId::MD5, success(AlgorithmId::MD5, "abc123"));

        assert!(combined_digest(&results, AlgorithmId::SHA256).is_none());
    }

    #[test]
    fn test_combined_digest_is_order_independent() {
        // "md5" sorts before "sha256", so the concatenation is fixed
        // regardless of map iteration order
        let mut results = HashMap::new();
        results.insert(AlgorithmId::SHA256, success(AlgorithmId::SHA256, "def456"));
        results.insert(AlgorithmId::MD5, success(AlgorithmId::MD5, "abc123"));

        let combined = combined_digest(&results, AlgorithmId::SHA256).unwrap();
        let expected = hash_bytes(AlgorithmId::SHA256, b"abc123def456");
        assert_eq!(combined, expected);
    }

    #[test]
    fn test_combined_digest_ignores_failures() {
        let mut results = HashMap::new();
        results.insert(AlgorithmId::MD5, success(AlgorithmId::MD5, "abc123"));
        results.insert(
            AlgorithmId::SHA1,
            HashResult::failure(
                AlgorithmId::SHA1,
                "test.bin",
                4,
                Duration::from_millis(1),
                "read failure",
            ),
        );

        // Only one successful digest remains, so no combination
        assert!(combined_digest(&results, AlgorithmId::SHA256).is_none());
    }
}
