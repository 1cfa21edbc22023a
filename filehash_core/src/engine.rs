//! Single-file multi-digest hashing engine
//!
//! For one file and one set of requested algorithms, the engine drives the
//! chunked reader once, feeds every chunk to every selected accumulator and
//! finalizes each to a hex digest with timing metadata. Request-scoped
//! validation errors propagate to the caller; file-scoped runtime errors are
//! caught at this boundary and converted into failed results.

use crate::cancel::CancelFlag;
use crate::chunker::ChunkedReader;
use crate::error::{InternalError, IoError, ValidationError};
use crate::hashing::{AlgorithmId, AlgorithmIdExt, AlgorithmRegistry, HashResult, StreamingHasher};
use crate::progress::{NullProvider, ProgressProvider, ProgressUpdate};
use crate::source::FileSource;
use crate::{Error, HasherConfig, Result};
use log::debug;
use std::collections::HashMap;
use std::time::Instant;

/// Outcome of the streaming pass, before results are assembled
struct RunOutput {
    digests: Vec<(AlgorithmId, String)>,
    bytes_processed: u64,
}

/// Multi-digest hashing engine for single files
#[derive(Debug, Clone)]
pub struct HashEngine {
    config: HasherConfig,
}

impl HashEngine {
    /// Create a new engine with the given limits
    pub fn new(config: HasherConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Validate a requested algorithm set without touching any stream
    ///
    /// The set must be non-empty, within the configured maximum, free of
    /// duplicates and fully covered by the registry.
    pub fn validate_algorithms(&self, algorithms: &[AlgorithmId]) -> Result<()> {
        if algorithms.is_empty() {
            return Err(Error::Validation(ValidationError::invalid_request(
                "at least one algorithm must be selected",
            )));
        }

        if algorithms.len() > self.config.max_algorithms {
            return Err(Error::Validation(ValidationError::invalid_request(&format!(
                "{} algorithms selected, limit is {}",
                algorithms.len(),
                self.config.max_algorithms
            ))));
        }

        let mut seen = Vec::with_capacity(algorithms.len());
        for algorithm in algorithms {
            if seen.contains(algorithm) {
                return Err(Error::Validation(ValidationError::invalid_request(&format!(
                    "algorithm {algorithm} selected more than once"
                ))));
            }
            seen.push(*algorithm);

            if AlgorithmRegistry::global()
                .get(&algorithm.to_string())
                .is_none()
            {
                return Err(Error::Validation(ValidationError::unsupported_algorithm(
                    &algorithm.to_string(),
                )));
            }
        }

        Ok(())
    }

    /// Hash a source with the requested algorithms
    pub async fn hash(
        &self,
        source: FileSource,
        algorithms: &[AlgorithmId],
    ) -> Result<HashMap<AlgorithmId, HashResult>> {
        self.hash_with_progress(source, algorithms, &NullProvider)
            .await
    }

    /// Hash a source, emitting per-chunk progress notifications
    pub async fn hash_with_progress(
        &self,
        source: FileSource,
        algorithms: &[AlgorithmId],
        progress: &dyn ProgressProvider,
    ) -> Result<HashMap<AlgorithmId, HashResult>> {
        let outcome = self
            .hash_with_cancellation(source, algorithms, progress, &CancelFlag::new())
            .await?;
        outcome.ok_or_else(|| {
            Error::Internal(InternalError::assertion(
                "hash cancelled without a cancellation flag",
            ))
        })
    }

    /// Hash a source with progress and cooperative cancellation
    ///
    /// Returns `None` when cancellation was observed mid-stream; the partial
    /// accumulator state is discarded. File-scoped errors (size ceiling,
    /// read failures, absorption guard) come back as one failed result per
    /// requested algorithm, all with the same error detail. Validation
    /// errors propagate as `Err` without the stream being touched.
    pub async fn hash_with_cancellation(
        &self,
        source: FileSource,
        algorithms: &[AlgorithmId],
        progress: &dyn ProgressProvider,
        cancel: &CancelFlag,
    ) -> Result<Option<HashMap<AlgorithmId, HashResult>>> {
        self.validate_algorithms(algorithms)?;

        let file_name = source.name().to_string();
        let file_size = source.declared_size();
        let start_time = Instant::now();

        match self.run(source, algorithms, progress, cancel).await {
            Ok(Some(output)) => {
                let duration = start_time.elapsed();
                debug!(
                    "hashed {file_name}: {} bytes, {} algorithms, {:?}",
                    output.bytes_processed,
                    algorithms.len(),
                    duration
                );

                let results = output
                    .digests
                    .into_iter()
                    .map(|(algorithm, digest)| {
                        (
                            algorithm,
                            HashResult::success(algorithm, digest, &file_name, file_size, duration),
                        )
                    })
                    .collect();
                Ok(Some(results))
            }
            Ok(None) => {
                debug!("hashing of {file_name} cancelled mid-stream");
                Ok(None)
            }
            Err(e) if e.is_file_scoped() => {
                let duration = start_time.elapsed();
                let detail = e.to_string();
                debug!("hashing of {file_name} failed: {detail}");

                let results = algorithms
                    .iter()
                    .map(|&algorithm| {
                        (
                            algorithm,
                            HashResult::failure(algorithm, &file_name, file_size, duration, &detail),
                        )
                    })
                    .collect();
                Ok(Some(results))
            }
            Err(e) => Err(e),
        }
    }

    /// Verify a source's digest against an expected value
    ///
    /// Unlike [`hash`](Self::hash), file-scoped errors propagate here: a
    /// read failure is not a mismatch.
    pub async fn verify_source(
        &self,
        source: FileSource,
        algorithm: AlgorithmId,
        expected: &str,
    ) -> Result<bool> {
        self.validate_algorithms(&[algorithm])?;

        let output = self
            .run(source, &[algorithm], &NullProvider, &CancelFlag::new())
            .await?
            .ok_or_else(|| {
                Error::Internal(InternalError::assertion(
                    "verification cancelled without a cancellation flag",
                ))
            })?;

        let (_, digest) = &output.digests[0];
        Ok(crate::verify::verify_digest(expected, digest))
    }

    /// The streaming pass: drive the reader once, feed every accumulator
    async fn run(
        &self,
        source: FileSource,
        algorithms: &[AlgorithmId],
        progress: &dyn ProgressProvider,
        cancel: &CancelFlag,
    ) -> Result<Option<RunOutput>> {
        let file_name = source.name().to_string();
        let file_size = source.declared_size();

        // Fail fast on the declared size before touching the stream
        if file_size > self.config.max_file_size {
            return Err(Error::Io(IoError::file_too_large(
                &file_name,
                file_size,
                self.config.max_file_size,
            )));
        }

        // One accumulator per algorithm, in request order: absorption is
        // independent per accumulator, but a deterministic feed order gives
        // a deterministic progress cadence.
        let registry = AlgorithmRegistry::global();
        let mut hashers: Vec<(AlgorithmId, Box<dyn StreamingHasher>)> = Vec::new();
        for &algorithm in algorithms {
            hashers.push((algorithm, registry.construct(&algorithm.to_string())?));
        }

        // Peak memory is one chunk buffer plus the accumulator states,
        // independent of file size
        let state_overhead: usize = algorithms
            .iter()
            .map(|a| a.to_impl().memory_overhead())
            .sum();
        debug!(
            "streaming {file_name}: {} byte chunks, ~{state_overhead} bytes accumulator state",
            self.config.chunk_size
        );

        let mut reader =
            ChunkedReader::open(source, self.config.chunk_size, self.config.max_file_size).await?;

        while let Some(chunk) = reader.next_chunk().await? {
            if cancel.is_cancelled() {
                return Ok(None);
            }

            for (algorithm, hasher) in hashers.iter_mut() {
                Self::absorb(*algorithm, hasher.as_mut(), chunk)?;
            }

            progress.report(ProgressUpdate::ChunkProgress {
                file: file_name.clone(),
                bytes_processed: reader.bytes_read(),
                bytes_total: file_size,
            });
        }

        let bytes_processed = reader.bytes_read();
        let digests = hashers
            .into_iter()
            .map(|(algorithm, hasher)| (algorithm, hasher.finalize()))
            .collect();

        Ok(Some(RunOutput {
            digests,
            bytes_processed,
        }))
    }

    /// Feed one chunk to one accumulator, guarding against panics
    ///
    /// A sound accumulator never fails here; the guard turns a misbehaving
    /// one into a reportable error instead of a crash.
    fn absorb(
        algorithm: AlgorithmId,
        hasher: &mut dyn StreamingHasher,
        chunk: &[u8],
    ) -> Result<()> {
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| hasher.update(chunk))).map_err(
            |_| {
                Error::Internal(InternalError::absorption_failure(
                    &algorithm.to_string(),
                    "accumulator panicked while absorbing a chunk",
                ))
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn engine() -> HashEngine {
        HashEngine::new(HasherConfig::test())
    }

    fn source_from(name: &str, data: &[u8]) -> FileSource {
        FileSource::from_reader(name, data.len() as u64, Cursor::new(data.to_vec()))
    }

    #[tokio::test]
    async fn test_single_algorithm() {
        let results = engine()
            .hash(source_from("hello.txt", b"a"), &[AlgorithmId::SHA256])
            .await
            .unwrap();

        let result = &results[&AlgorithmId::SHA256];
        assert!(result.is_success());
        assert_eq!(
            result.digest.as_deref(),
            Some("ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb")
        );
        assert_eq!(result.file_name, "hello.txt");
        assert_eq!(result.file_size, 1);
    }

    #[tokio::test]
    async fn test_multiple_algorithms_share_one_pass() {
        let algorithms = [AlgorithmId::MD5, AlgorithmId::SHA1, AlgorithmId::SHA256];
        let results = engine()
            .hash(source_from("empty.bin", b""), &algorithms)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(
            results[&AlgorithmId::MD5].digest.as_deref(),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
        assert_eq!(
            results[&AlgorithmId::SHA256].digest.as_deref(),
            Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
        // Elapsed time is per file, shared by every algorithm's result
        assert_eq!(
            results[&AlgorithmId::MD5].duration,
            results[&AlgorithmId::SHA256].duration
        );
        assert_eq!(results[&AlgorithmId::MD5].file_size, 0);
    }

    #[tokio::test]
    async fn test_empty_algorithm_set_rejected() {
        let result = engine().hash(source_from("any.bin", b"data"), &[]).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidRequest { .. }))
        ));
    }

    #[tokio::test]
    async fn test_oversized_algorithm_set_rejected() {
        let algorithms = [
            AlgorithmId::MD5,
            AlgorithmId::SHA1,
            AlgorithmId::SHA256,
            AlgorithmId::SHA512,
        ];
        let result = engine()
            .hash(source_from("any.bin", b"data"), &algorithms)
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidRequest { .. }))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_algorithms_rejected() {
        let result = engine()
            .hash(
                source_from("any.bin", b"data"),
                &[AlgorithmId::MD5, AlgorithmId::MD5],
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidRequest { .. }))
        ));
    }

    #[tokio::test]
    async fn test_declared_size_over_limit_fails_per_file() {
        let config = HasherConfig {
            max_file_size: 16,
            ..HasherConfig::test()
        };
        let engine = HashEngine::new(config);

        let results = engine
            .hash(
                source_from("big.bin", &[0u8; 64]),
                &[AlgorithmId::MD5, AlgorithmId::SHA1],
            )
            .await
            .unwrap();

        // One failed result per requested algorithm, same error detail
        assert_eq!(results.len(), 2);
        let md5 = &results[&AlgorithmId::MD5];
        let sha1 = &results[&AlgorithmId::SHA1];
        assert!(!md5.is_success());
        assert!(!sha1.is_success());
        assert_eq!(md5.error, sha1.error);
        assert!(md5.error.as_deref().unwrap().contains("File too large"));
    }

    #[tokio::test]
    async fn test_lying_source_caught_by_reader() {
        let config = HasherConfig {
            max_file_size: 1024,
            ..HasherConfig::test()
        };
        let engine = HashEngine::new(config);

        // Declares 100 bytes but streams 4096
        let source = FileSource::from_reader("liar.bin", 100, Cursor::new(vec![0u8; 4096]));
        let results = engine.hash(source, &[AlgorithmId::SHA256]).await.unwrap();

        let result = &results[&AlgorithmId::SHA256];
        assert!(!result.is_success());
        assert!(result.error.as_deref().unwrap().contains("File too large"));
    }

    #[tokio::test]
    async fn test_read_failure_converted_to_failed_results() {
        struct FailingReader;

        impl tokio::io::AsyncRead for FailingReader {
            fn poll_read(
                self: std::pin::Pin<&mut Self>,
                _cx: &mut std::task::Context<'_>,
                _buf: &mut tokio::io::ReadBuf<'_>,
            ) -> std::task::Poll<std::io::Result<()>> {
                std::task::Poll::Ready(Err(std::io::Error::other("device unplugged")))
            }
        }

        let source = FileSource::from_reader("flaky.bin", 64, FailingReader);
        let results = engine()
            .hash(source, &[AlgorithmId::MD5, AlgorithmId::SHA256])
            .await
            .unwrap();

        for result in results.values() {
            assert!(!result.is_success());
            assert!(result.error.as_deref().unwrap().contains("device unplugged"));
        }
    }

    #[tokio::test]
    async fn test_cancellation_discards_partial_work() {
        let cancel = CancelFlag::new();
        cancel.cancel();

        let outcome = engine()
            .hash_with_cancellation(
                source_from("c.bin", &[0u8; 8192]),
                &[AlgorithmId::SHA256],
                &NullProvider,
                &cancel,
            )
            .await
            .unwrap();

        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_verify_source_match() {
        let verified = engine()
            .verify_source(
                source_from("a.txt", b"a"),
                AlgorithmId::SHA256,
                "CA978112CA1BBDCAFAC231B39A23DC4DA786EFF8147C4E72B9807785AFEE48BB",
            )
            .await
            .unwrap();
        assert!(verified);
    }

    #[tokio::test]
    async fn test_verify_source_mismatch() {
        let verified = engine()
            .verify_source(
                source_from("a.txt", b"a"),
                AlgorithmId::SHA256,
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            )
            .await
            .unwrap();
        assert!(!verified);
    }
}
