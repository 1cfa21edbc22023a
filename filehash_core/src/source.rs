//! Byte sources for hashing operations
//!
//! A [`FileSource`] is a named, sized, byte-readable handle. The open/close
//! lifecycle of path-backed sources stays inside the core: the handle is
//! acquired lazily when streaming begins and released when the reader is
//! dropped, on every exit path. Reader-backed sources let external
//! collaborators (uploads, tests) supply the stream themselves.

use crate::error::IoError;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;

/// A named, sized byte source for one hashing operation
///
/// The stream is consumed exactly once, forward-only. Restarting requires a
/// fresh `FileSource`.
pub struct FileSource {
    name: String,
    declared_size: u64,
    inner: SourceInner,
}

enum SourceInner {
    Path(PathBuf),
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl std::fmt::Debug for FileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSource")
            .field("name", &self.name)
            .field("declared_size", &self.declared_size)
            .field(
                "inner",
                match &self.inner {
                    SourceInner::Path(path) => path as &dyn std::fmt::Debug,
                    SourceInner::Reader(_) => &"<reader>" as &dyn std::fmt::Debug,
                },
            )
            .finish()
    }
}

impl FileSource {
    /// Create a source backed by a file on disk
    ///
    /// The declared size is taken from the file metadata; the file itself is
    /// not opened until streaming begins.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| Error::Io(IoError::from_std(e).with_name(&name)))?;

        Ok(Self {
            name,
            declared_size: metadata.len(),
            inner: SourceInner::Path(path.to_path_buf()),
        })
    }

    /// Create a source backed by an arbitrary async reader
    ///
    /// The caller owns the reader's provenance and declares its size; the
    /// core still enforces the configured size ceiling against the bytes
    /// actually read.
    pub fn from_reader(
        name: &str,
        declared_size: u64,
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            declared_size,
            inner: SourceInner::Reader(Box::new(reader)),
        }
    }

    /// Source name (filename for path-backed sources)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared size in bytes
    pub fn declared_size(&self) -> u64 {
        self.declared_size
    }

    /// Open the underlying stream, consuming the source
    pub(crate) async fn open(self) -> Result<Box<dyn AsyncRead + Send + Unpin>> {
        match self.inner {
            SourceInner::Path(path) => {
                let file = tokio::fs::File::open(&path)
                    .await
                    .map_err(|e| Error::Io(IoError::from_std(e).with_name(&self.name)))?;
                Ok(Box::new(file))
            }
            SourceInner::Reader(reader) => Ok(reader),
        }
    }
}
