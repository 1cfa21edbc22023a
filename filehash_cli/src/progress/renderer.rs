//! Progress rendering for the CLI
//!
//! This module handles the visual rendering of progress updates,
//! converting ProgressUpdate messages into terminal output.

use colored::*;
use filehash_core::ProcessingStatus;
use filehash_core::progress::ProgressUpdate;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Render progress updates from a channel until all senders are dropped
pub async fn render_progress(mut rx: mpsc::Receiver<ProgressUpdate>) {
    let mut renderer = ProgressRenderer::new();

    while let Some(update) = rx.recv().await {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Progress renderer that manages visual progress display
pub struct ProgressRenderer {
    file_bars: HashMap<String, ProgressBar>,
    batch_bar: Option<ProgressBar>,
}

impl ProgressRenderer {
    /// Create a new progress renderer
    pub fn new() -> Self {
        Self {
            file_bars: HashMap::new(),
            batch_bar: None,
        }
    }

    /// Handle a progress update
    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::FileStarted { file, bytes_total } => {
                self.start_file(file, bytes_total);
            }

            ProgressUpdate::ChunkProgress {
                file,
                bytes_processed,
                bytes_total,
            } => {
                self.update_file_progress(file, bytes_processed, bytes_total);
            }

            ProgressUpdate::FileCompleted { file, status } => {
                self.complete_file(&file, status);
            }

            ProgressUpdate::BatchProgress { current, total } => {
                self.update_batch_progress(current, total);
            }
        }
    }

    /// Begin a per-file progress bar
    fn start_file(&mut self, file: String, bytes_total: u64) {
        let pb = ProgressBar::new(bytes_total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% | {bytes}/{total_bytes} | {bytes_per_sec} | ETA: {eta}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(format!("{}: {}", "Hashing".bold(), file.cyan()));
        self.file_bars.insert(file, pb);
    }

    /// Update per-file streaming progress
    fn update_file_progress(&mut self, file: String, bytes_processed: u64, bytes_total: u64) {
        let pb = self
            .file_bars
            .entry(file.clone())
            .or_insert_with(|| ProgressBar::new(bytes_total));
        pb.set_position(bytes_processed);
    }

    /// Finish a per-file progress bar with its final status
    fn complete_file(&mut self, file: &str, status: ProcessingStatus) {
        if let Some(pb) = self.file_bars.remove(file) {
            let message = match status {
                ProcessingStatus::Completed => format!("{} {}", "✓".green(), file),
                ProcessingStatus::Failed => format!("{} {}", "✗".red(), file),
                ProcessingStatus::Skipped => format!("{} {} (skipped)", "-".yellow(), file),
            };
            pb.finish_with_message(message);
        }
    }

    /// Update batch progress
    fn update_batch_progress(&mut self, current: usize, total: usize) {
        if self.batch_bar.is_none() {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{msg}\n[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files | {percent}%")
                    .unwrap()
                    .progress_chars("##-"),
            );
            bar.set_message("Processing batch".bold().to_string());
            self.batch_bar = Some(bar);
        }

        if let Some(bar) = &self.batch_bar {
            bar.set_position(current as u64);
        }
    }

    /// Finish all progress bars
    pub fn finish(self) {
        for (_, pb) in self.file_bars {
            pb.finish_and_clear();
        }

        if let Some(bar) = self.batch_bar {
            bar.finish_with_message("✓ Batch complete".green().to_string());
        }
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}
