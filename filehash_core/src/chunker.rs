//! Chunked streaming reads over a byte source
//!
//! The reader yields fixed-size chunks in a single forward pass, enforcing a
//! byte ceiling as it goes. It is not restartable: incremental digests must
//! see each byte exactly once and in order.

use crate::error::{IoError, ValidationError};
use crate::source::FileSource;
use crate::{Error, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Streaming chunk reader with a size ceiling
///
/// Every chunk is exactly `chunk_size` bytes except possibly the last. The
/// underlying handle is released when the reader is dropped, on every exit
/// path including early termination.
pub struct ChunkedReader {
    reader: Box<dyn AsyncRead + Send + Unpin>,
    buffer: Vec<u8>,
    name: String,
    bytes_read: u64,
    max_bytes: u64,
    finished: bool,
}

impl ChunkedReader {
    /// Open a source for chunked reading
    pub async fn open(source: FileSource, chunk_size: usize, max_bytes: u64) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Validation(ValidationError::invalid_parameter(
                "chunk_size",
                "must be greater than zero",
            )));
        }

        let name = source.name().to_string();
        let reader = source.open().await?;

        Ok(Self {
            reader,
            buffer: vec![0u8; chunk_size],
            name,
            bytes_read: 0,
            max_bytes,
            finished: false,
        })
    }

    /// Read the next chunk, or `None` once the source is exhausted
    ///
    /// Fails with a size-ceiling violation as soon as the cumulative byte
    /// count exceeds the maximum; the excess is never accumulated beyond the
    /// single probe read that detected it.
    pub async fn next_chunk(&mut self) -> Result<Option<&[u8]>> {
        if self.finished {
            return Ok(None);
        }

        // Fill the buffer so every chunk except the last is full-size; a
        // short read from the source does not produce a short chunk.
        let mut filled = 0usize;
        while filled < self.buffer.len() {
            let n = match self.reader.read(&mut self.buffer[filled..]).await {
                Ok(n) => n,
                Err(e) => {
                    self.finished = true;
                    return Err(Error::Io(IoError::read_failure(&self.name, e)));
                }
            };
            if n == 0 {
                break;
            }
            filled += n;
            if self.bytes_read + filled as u64 > self.max_bytes {
                self.finished = true;
                return Err(Error::Io(IoError::file_too_large(
                    &self.name,
                    self.bytes_read + filled as u64,
                    self.max_bytes,
                )));
            }
        }

        if filled == 0 {
            self.finished = true;
            return Ok(None);
        }

        self.bytes_read += filled as u64;
        Ok(Some(&self.buffer[..filled]))
    }

    /// Total bytes yielded so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}
