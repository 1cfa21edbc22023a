//! Batch processing of multiple files with per-file fault isolation
//!
//! The coordinator validates the whole request up front, then processes
//! files sequentially: each file is streamed to completion before the next
//! begins, bounding peak memory to one chunk buffer plus the accumulator
//! states. A failure in one file never stops the others, and the output
//! order always matches the input order.

use crate::cancel::CancelFlag;
use crate::engine::HashEngine;
use crate::error::ValidationError;
use crate::hashing::{AlgorithmId, HashResult};
use crate::progress::{ProgressProvider, ProgressUpdate};
use crate::source::FileSource;
use crate::{Error, HasherConfig, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Processing status for files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingStatus {
    /// Every requested algorithm produced a digest
    Completed,
    /// The file's computation was aborted; all its results carry the error
    Failed,
    /// The file was never processed (batch cancelled before or during it)
    Skipped,
}

/// Per-file record in a batch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub file_name: String,
    pub file_size: u64,
    pub status: ProcessingStatus,
    pub hashes: HashMap<AlgorithmId, HashResult>,
    pub processing_time: Duration,
}

/// Result of one batch run
///
/// Reports appear in input order regardless of how processing went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Total files requested
    pub total_files: usize,
    /// Files where every algorithm succeeded
    pub successful: usize,
    /// Files with at least one failure
    pub failed: usize,
    /// Files never attempted due to cancellation
    pub skipped: usize,
    /// Total batch wall time
    pub total_time: Duration,
    /// Per-file reports, in input order
    pub reports: Vec<FileReport>,
}

/// Coordinator for multi-file, multi-algorithm batch runs
#[derive(Debug, Clone)]
pub struct BatchCoordinator {
    config: HasherConfig,
    engine: HashEngine,
}

impl BatchCoordinator {
    /// Create a new coordinator with the given limits
    pub fn new(config: HasherConfig) -> Self {
        let engine = HashEngine::new(config.clone());
        Self { config, engine }
    }

    /// The engine used for per-file processing
    pub fn engine(&self) -> &HashEngine {
        &self.engine
    }

    /// Run a batch
    ///
    /// Request-scoped validation (file count, algorithm set) happens before
    /// any file is opened or read and aborts the whole call. Once file
    /// processing has begun the call always returns a [`BatchResult`]
    /// listing every requested file, successful or not.
    pub async fn run(
        &self,
        sources: Vec<FileSource>,
        algorithms: &[AlgorithmId],
        progress: Arc<dyn ProgressProvider>,
        cancel: &CancelFlag,
    ) -> Result<BatchResult> {
        if sources.is_empty() {
            return Err(Error::Validation(ValidationError::invalid_request(
                "at least one file must be provided",
            )));
        }

        if sources.len() > self.config.max_files {
            return Err(Error::Validation(ValidationError::too_many_files(
                sources.len(),
                self.config.max_files,
            )));
        }

        self.engine.validate_algorithms(algorithms)?;

        let start_time = Instant::now();
        let total_files = sources.len();
        let mut reports: Vec<FileReport> = Vec::with_capacity(total_files);

        for source in sources {
            let file_name = source.name().to_string();
            let file_size = source.declared_size();

            if cancel.is_cancelled() {
                debug!("batch cancelled, skipping {file_name}");
                progress.report(ProgressUpdate::FileCompleted {
                    file: file_name.clone(),
                    status: ProcessingStatus::Skipped,
                });
                reports.push(FileReport {
                    file_name,
                    file_size,
                    status: ProcessingStatus::Skipped,
                    hashes: HashMap::new(),
                    processing_time: Duration::ZERO,
                });
                continue;
            }

            progress.report(ProgressUpdate::FileStarted {
                file: file_name.clone(),
                bytes_total: file_size,
            });

            let file_start = Instant::now();
            let child = progress.create_child(&file_name);
            let outcome = self
                .engine
                .hash_with_cancellation(source, algorithms, child.as_ref(), cancel)
                .await?;

            let (status, hashes) = match outcome {
                Some(results) => {
                    let status = if results.values().all(HashResult::is_success) {
                        ProcessingStatus::Completed
                    } else {
                        ProcessingStatus::Failed
                    };
                    (status, results)
                }
                // Cancelled mid-stream: the partial result is discarded
                None => (ProcessingStatus::Skipped, HashMap::new()),
            };

            progress.report(ProgressUpdate::FileCompleted {
                file: file_name.clone(),
                status,
            });
            progress.report(ProgressUpdate::BatchProgress {
                current: reports.len() + 1,
                total: total_files,
            });

            reports.push(FileReport {
                file_name,
                file_size,
                status,
                hashes,
                processing_time: file_start.elapsed(),
            });
        }

        let successful = reports
            .iter()
            .filter(|r| r.status == ProcessingStatus::Completed)
            .count();
        let failed = reports
            .iter()
            .filter(|r| r.status == ProcessingStatus::Failed)
            .count();
        let skipped = reports
            .iter()
            .filter(|r| r.status == ProcessingStatus::Skipped)
            .count();

        Ok(BatchResult {
            total_files,
            successful,
            failed,
            skipped,
            total_time: start_time.elapsed(),
            reports,
        })
    }
}
