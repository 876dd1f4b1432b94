//! High-water mark of bytes charged to an [`AllocationLedger`](crate::AllocationLedger).

use std::sync::atomic::{AtomicUsize, Ordering};

/// Largest combined managed + external charge the ledger has held at once.
#[derive(Debug, Default)]
pub struct PeakTracker {
    peak_bytes: AtomicUsize,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self {
            peak_bytes: AtomicUsize::new(0),
        }
    }

    /// Called by the ledger after each successful charge with its new total.
    pub fn record_used(&self, used_bytes: usize) {
        self.peak_bytes.fetch_max(used_bytes, Ordering::AcqRel);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            used_bytes,
            peak = self.peak_bytes.load(Ordering::Relaxed),
            "ledger usage"
        );
    }

    pub fn peak(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_only_moves_up() {
        let t = PeakTracker::new();
        t.record_used(40);
        t.record_used(10);
        assert_eq!(t.peak(), 40);
        t.record_used(64);
        assert_eq!(t.peak(), 64);
    }
}
