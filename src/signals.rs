use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cloak::ControlSignals;

/// Shared flags raised by external events and drained by the pipeline.
/// Cancel latches once raised; recapture is consumed by the poll that
/// observes it.
#[derive(Clone, Default)]
pub struct SharedSignals {
    cancel: Arc<AtomicBool>,
    recapture: Arc<AtomicBool>,
}

impl SharedSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn request_recapture(&self) {
        self.recapture.store(true, Ordering::SeqCst);
    }

    /// Install a Ctrl+C handler that raises the cancel flag.
    pub fn install_ctrlc(&self) -> Result<()> {
        let flags = self.clone();
        ctrlc::set_handler(move || {
            tracing::info!("Ctrl+C received, shutting down");
            flags.request_cancel();
        })
        .context("Failed to install Ctrl+C handler")
    }
}

impl ControlSignals for SharedSignals {
    fn poll_cancel(&mut self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn poll_recapture(&mut self) -> bool {
        self.recapture.swap(false, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_latches() {
        let mut signals = SharedSignals::new();
        assert!(!signals.poll_cancel());
        signals.request_cancel();
        assert!(signals.poll_cancel());
        assert!(signals.poll_cancel());
    }

    #[test]
    fn recapture_is_one_shot() {
        let mut signals = SharedSignals::new();
        assert!(!signals.poll_recapture());
        signals.request_recapture();
        assert!(signals.poll_recapture());
        assert!(!signals.poll_recapture());
    }

    #[test]
    fn clones_share_the_same_flags() {
        let signals = SharedSignals::new();
        let mut other = signals.clone();
        signals.request_recapture();
        assert!(other.poll_recapture());
    }
}
