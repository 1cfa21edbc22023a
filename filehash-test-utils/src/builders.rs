//! Test data builders for creating on-disk fixtures

use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for temp-file fixtures with known content
///
/// Files live inside a private temp directory that is removed when the
/// builder is dropped, so tests never leak fixtures.
pub struct TestFileBuilder {
    dir: TempDir,
}

impl TestFileBuilder {
    /// Create a new builder with a fresh temp directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp directory"),
        }
    }

    /// Path of the backing temp directory
    pub fn dir_path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file with the given content, returning its path
    pub fn create_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("failed to write fixture file");
        path
    }

    /// Create a file of `size` bytes filled with `fill`
    pub fn create_filled_file(&self, name: &str, size: usize, fill: u8) -> PathBuf {
        self.create_file(name, &vec![fill; size])
    }

    /// Create a file whose content is a repeating byte ramp, useful when a
    /// constant fill would mask ordering bugs
    pub fn create_patterned_file(&self, name: &str, size: usize) -> PathBuf {
        let content: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        self.create_file(name, &content)
    }
}

impl Default for TestFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
