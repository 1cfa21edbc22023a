//! Streaming behavior of the hash engine: chunking invariance, progress
//! cadence, and validation ordering relative to stream access

use filehash_core::progress::NullProvider;
use filehash_core::{
    AlgorithmId, CancelFlag, FileSource, HashEngine, HasherConfig, ProgressUpdate,
};
use filehash_test_utils::{CountingReader, RecordingProvider, TestFileBuilder};
use proptest::prelude::*;
use std::io::Cursor;

fn engine_with_chunk_size(chunk_size: usize) -> HashEngine {
    HashEngine::new(HasherConfig {
        chunk_size,
        ..HasherConfig::test()
    })
}

fn source_from(name: &str, data: &[u8]) -> FileSource {
    FileSource::from_reader(name, data.len() as u64, Cursor::new(data.to_vec()))
}

/// The digest must not depend on how the stream is chunked
#[tokio::test]
async fn test_chunking_invariance_fixed_sizes() {
    let data: Vec<u8> = (0..20_000).map(|i| (i % 251) as u8).collect();
    let algorithms = [AlgorithmId::SHA256, AlgorithmId::MD5, AlgorithmId::Blake2b];

    let mut baseline = None;
    for chunk_size in [1, 7, 1024, 8192, 32_768] {
        let engine = engine_with_chunk_size(chunk_size);
        let results = engine
            .hash(source_from("pattern.bin", &data), &algorithms)
            .await
            .unwrap();

        let digests: Vec<_> = algorithms
            .iter()
            .map(|a| results[a].digest.clone().unwrap())
            .collect();

        match &baseline {
            None => baseline = Some(digests),
            Some(expected) => assert_eq!(
                &digests, expected,
                "digest changed with chunk size {chunk_size}"
            ),
        }
    }
}

/// Streaming a file from disk matches hashing the same bytes in memory
#[tokio::test]
async fn test_file_streaming_matches_in_memory() {
    let builder = TestFileBuilder::new();
    let data: Vec<u8> = (0..50_000).map(|i| (i % 199) as u8).collect();
    let path = builder.create_file("stream.bin", &data);

    let engine = engine_with_chunk_size(8192);
    let source = FileSource::from_path(&path).await.unwrap();
    let results = engine.hash(source, &[AlgorithmId::SHA512]).await.unwrap();

    assert_eq!(
        results[&AlgorithmId::SHA512].digest.as_deref().unwrap(),
        filehash_core::hash_bytes(AlgorithmId::SHA512, &data)
    );
}

/// Spec scenario: a zero-byte file yields the well-known empty digests with
/// a zero byte count
#[tokio::test]
async fn test_zero_byte_file_known_digests() {
    let builder = TestFileBuilder::new();
    let path = builder.create_file("empty.bin", b"");

    let engine = engine_with_chunk_size(8192);
    let source = FileSource::from_path(&path).await.unwrap();
    let results = engine
        .hash(source, &[AlgorithmId::SHA256, AlgorithmId::MD5])
        .await
        .unwrap();

    assert_eq!(
        results[&AlgorithmId::SHA256].digest.as_deref(),
        Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
    );
    assert_eq!(
        results[&AlgorithmId::MD5].digest.as_deref(),
        Some("d41d8cd98f00b204e9800998ecf8427e")
    );
    assert_eq!(results[&AlgorithmId::SHA256].file_size, 0);
}

/// One chunk-progress notification per chunk, with monotone byte counts
#[tokio::test]
async fn test_progress_cadence() {
    let data = vec![0x5Au8; 4096 + 100];
    let engine = engine_with_chunk_size(1024);
    let provider = RecordingProvider::new();

    engine
        .hash_with_progress(
            source_from("progress.bin", &data),
            &[AlgorithmId::SHA1],
            &provider,
        )
        .await
        .unwrap();

    let chunk_updates: Vec<(u64, u64)> = provider
        .updates()
        .into_iter()
        .filter_map(|u| match u {
            ProgressUpdate::ChunkProgress {
                bytes_processed,
                bytes_total,
                ..
            } => Some((bytes_processed, bytes_total)),
            _ => None,
        })
        .collect();

    // 4 full chunks + 1 short tail
    assert_eq!(chunk_updates.len(), 5);
    assert!(chunk_updates.windows(2).all(|w| w[0].0 < w[1].0));
    assert_eq!(chunk_updates.last().unwrap().0, 4196);
    assert!(chunk_updates.iter().all(|&(_, total)| total == 4196));
}

/// An invalid request must fail before the stream is touched
#[tokio::test]
async fn test_validation_precedes_stream_access() {
    let (reader, reads) = CountingReader::new(Cursor::new(vec![0u8; 1024]));
    let source = FileSource::from_reader("untouched.bin", 1024, reader);

    let engine = engine_with_chunk_size(1024);
    let result = engine.hash(source, &[]).await;

    assert!(result.is_err());
    assert_eq!(reads.load(std::sync::atomic::Ordering::SeqCst), 0);
}

/// A declared size over the ceiling must also fail without a read
#[tokio::test]
async fn test_declared_size_check_precedes_stream_access() {
    let (reader, reads) = CountingReader::new(Cursor::new(vec![0u8; 64]));
    let source = FileSource::from_reader("huge-by-declaration.bin", 1 << 40, reader);

    let engine = engine_with_chunk_size(1024);
    let results = engine.hash(source, &[AlgorithmId::MD5]).await.unwrap();

    assert!(!results[&AlgorithmId::MD5].is_success());
    assert_eq!(reads.load(std::sync::atomic::Ordering::SeqCst), 0);
}

/// Cancellation observed at a chunk boundary discards the file's work
#[tokio::test]
async fn test_cancellation_at_chunk_boundary() {
    let cancel = CancelFlag::new();
    cancel.cancel();

    let engine = engine_with_chunk_size(1024);
    let outcome = engine
        .hash_with_cancellation(
            source_from("cancelled.bin", &vec![0u8; 8192]),
            &[AlgorithmId::SHA256],
            &NullProvider,
            &cancel,
        )
        .await
        .unwrap();

    assert!(outcome.is_none());
}

proptest! {
    /// Hashing the same content twice yields identical digests
    #[test]
    fn test_hash_determinism(data: Vec<u8>) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let engine = engine_with_chunk_size(1024);
            let algorithms = [AlgorithmId::SHA256, AlgorithmId::Blake2s];

            let first = engine
                .hash(source_from("d.bin", &data), &algorithms)
                .await
                .unwrap();
            let second = engine
                .hash(source_from("d.bin", &data), &algorithms)
                .await
                .unwrap();

            for algorithm in algorithms {
                prop_assert_eq!(
                    first[&algorithm].digest.as_deref(),
                    second[&algorithm].digest.as_deref()
                );
            }
            Ok(())
        })?;
    }

    /// Streamed digests match the in-memory reference for any content and
    /// chunk size
    #[test]
    fn test_chunking_invariance(data: Vec<u8>, chunk_size in 1usize..4096) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let engine = engine_with_chunk_size(chunk_size);
            let results = engine
                .hash(source_from("c.bin", &data), &[AlgorithmId::SHA256])
                .await
                .unwrap();

            prop_assert_eq!(
                results[&AlgorithmId::SHA256].digest.as_deref().unwrap(),
                filehash_core::hash_bytes(AlgorithmId::SHA256, &data)
            );
            Ok(())
        })?;
    }
}
