//! Single-slot admission control for thumbnail requests.

use generate_thumbnails::ThumbnailError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Admits at most one request at a time. A request arriving while another one is pending is
/// rejected rather than queued.
#[derive(Debug, Default)]
pub struct RequestGate {
    busy: Arc<AtomicBool>,
}

impl RequestGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the gate from idle to busy, or fails with [`ThumbnailError::AlreadyActive`].
    ///
    /// Admission happens before the call is parsed, so the returned [`PendingOperation`] learns
    /// which source it belongs to through [`PendingOperation::bind`]. The gate stays busy until
    /// it is dropped.
    pub fn try_admit(&self) -> Result<PendingOperation, ThumbnailError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ThumbnailError::AlreadyActive)?;

        Ok(PendingOperation {
            busy: Arc::clone(&self.busy),
            source: None,
        })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// The in-flight request. Dropping it returns the gate to idle.
#[derive(Debug)]
#[must_use = "the gate is released as soon as the pending operation is dropped"]
pub struct PendingOperation {
    busy: Arc<AtomicBool>,
    source: Option<String>,
}

impl PendingOperation {
    /// Records the source locator of the admitted request.
    pub fn bind(&mut self, source: &str) {
        self.source = Some(source.to_owned());
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl Drop for PendingOperation {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
