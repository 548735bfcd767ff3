//! Single-flight latch for user-initiated actions.

use std::sync::atomic::{AtomicBool, Ordering};

/// Allows one pending action at a time.
#[derive(Debug, Default)]
pub struct ActionLatch {
    pending: AtomicBool,
}

/// Releases the latch when dropped, including on early return or panic.
#[derive(Debug)]
pub struct LatchGuard<'a> {
    latch: &'a ActionLatch,
}

impl ActionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another action holds the latch.
    pub fn try_acquire(&self) -> Option<LatchGuard<'_>> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LatchGuard { latch: self })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.latch.pending.store(false, Ordering::Release);
    }
}
