//! Mock implementations for testing

use filehash_core::progress::{ProgressProvider, ProgressUpdate};
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Progress provider that records every update it receives
pub struct RecordingProvider {
    updates: Arc<Mutex<Vec<ProgressUpdate>>>,
}

impl RecordingProvider {
    /// Create a new recording provider
    pub fn new() -> Self {
        Self {
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of the updates received so far
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().unwrap().clone()
    }

    /// Number of updates received so far
    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

impl Default for RecordingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressProvider for RecordingProvider {
    fn report(&self, update: ProgressUpdate) {
        self.updates.lock().unwrap().push(update);
    }

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        Box::new(RecordingProvider {
            updates: Arc::clone(&self.updates),
        })
    }

    fn complete(&self) {}
}

/// Reader wrapper that counts how many read calls reach the underlying source
///
/// Used to assert that validation failures never touch the stream.
pub struct CountingReader<R> {
    inner: R,
    reads: Arc<AtomicU64>,
}

impl<R> CountingReader<R> {
    /// Wrap a reader; the returned counter observes read calls
    pub fn new(inner: R) -> (Self, Arc<AtomicU64>) {
        let reads = Arc::new(AtomicU64::new(0));
        (
            Self {
                inner,
                reads: Arc::clone(&reads),
            },
            reads,
        )
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for CountingReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

/// Reader that yields some bytes and then fails with an I/O error
///
/// Simulates a truncated upload or a device error mid-stream.
pub struct FailingReader {
    data: Vec<u8>,
    pos: usize,
}

impl FailingReader {
    /// Create a reader that serves `data` and then errors instead of EOF
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        if self.pos >= self.data.len() {
            return Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stream truncated",
            )));
        }

        let remaining = self.data.len() - self.pos;
        let to_copy = remaining.min(buf.remaining());
        let start = self.pos;
        buf.put_slice(&self.data[start..start + to_copy]);
        self.pos += to_copy;
        Poll::Ready(Ok(()))
    }
}
