//! Performance benchmarks for digest algorithms
//!
//! Benchmark suite that measures actual performance of the hashing
//! implementations, focusing on our implementation's overhead rather than
//! raw algorithm speed.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use filehash_core::{AlgorithmId, FileSource, HashEngine, HasherConfig, hash_bytes};
use std::hint::black_box;
use tokio::runtime::Runtime;

/// Benchmark digest algorithms with different input sizes
fn benchmark_hash_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_algorithms");

    // Test with various input sizes, focusing on real-world use cases
    let sizes = vec![
        1_024,      // 1KB - Small files
        102_400,    // 100KB - Documents
        1_048_576,  // 1MB - Images
        10_485_760, // 10MB - Archives
    ];

    for size in sizes {
        let data = generate_test_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        for algorithm in [
            AlgorithmId::MD5,
            AlgorithmId::SHA256,
            AlgorithmId::SHA3_256,
            AlgorithmId::Blake2b,
        ] {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), format_size(size)),
                &data,
                |b, data| {
                    b.iter(|| {
                        let digest = hash_bytes(algorithm, black_box(data));
                        black_box(digest);
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the streaming engine end to end, one pass with three digests
fn benchmark_multi_digest_streaming(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("multi_digest_streaming");

    let size = 10_485_760; // 10MB
    let data = generate_test_data(size);
    group.throughput(Throughput::Bytes(size as u64));

    let engine = HashEngine::new(HasherConfig {
        max_file_size: u64::MAX,
        ..HasherConfig::default()
    });
    let algorithms = [AlgorithmId::MD5, AlgorithmId::SHA256, AlgorithmId::Blake2b];

    group.bench_function("three_digests_one_pass", |b| {
        b.iter(|| {
            let source = FileSource::from_reader(
                "bench.bin",
                data.len() as u64,
                std::io::Cursor::new(data.clone()),
            );
            let results = rt.block_on(engine.hash(source, &algorithms)).unwrap();
            black_box(results);
        })
    });

    group.finish();
}

/// Generate deterministic test data
fn generate_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn format_size(size: usize) -> String {
    if size >= 1_048_576 {
        format!("{}MB", size / 1_048_576)
    } else {
        format!("{}KB", size / 1_024)
    }
}

criterion_group!(
    benches,
    benchmark_hash_algorithms,
    benchmark_multi_digest_streaming
);
criterion_main!(benches);
