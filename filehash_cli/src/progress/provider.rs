//! Progress provider implementation for CLI
//!
//! This module provides the CLI-specific implementation of the ProgressProvider trait,
//! which bridges the core library's progress reporting with the CLI's rendering system.

use filehash_core::progress::{ProgressProvider, ProgressUpdate};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Channel-based progress provider for CLI rendering
///
/// This provider sends progress updates through a channel to a separate
/// rendering task, decoupling the progress reporting from the UI rendering.
/// Sends never block: if the renderer falls behind, updates are dropped.
pub struct ChannelProvider {
    tx: Mutex<Option<mpsc::Sender<ProgressUpdate>>>,
}

impl ChannelProvider {
    /// Create a new channel provider
    pub fn new(tx: mpsc::Sender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        // Try to send, but don't block or panic if receiver is dropped
        let tx_opt = { self.tx.lock().unwrap().clone() };
        if let Some(tx) = tx_opt {
            let _ = tx.try_send(update);
        }
    }

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        let tx_opt = { self.tx.lock().unwrap().clone() };
        Box::new(ChannelProvider {
            tx: Mutex::new(tx_opt),
        })
    }

    fn complete(&self) {
        // Drop our sender so the renderer can exit its loop
        let mut guard = self.tx.lock().unwrap();
        *guard = None;
    }
}

/// Create a progress provider and renderer channel pair for CLI operations
pub fn create_progress_infrastructure()
-> (Arc<dyn ProgressProvider>, mpsc::Receiver<ProgressUpdate>) {
    let (tx, rx) = mpsc::channel(100);
    let provider = Arc::new(ChannelProvider::new(tx)) as Arc<dyn ProgressProvider>;
    (provider, rx)
}
