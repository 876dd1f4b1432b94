//! Allocation ledger + RAII guards for buffer storage.
//!
//! Buffers allocated through [`BufferAllocator`] charge their storage bytes to
//! an [`AllocationLedger`], split by [`Backing`]. Dropping the buffer (and its
//! guard) returns the bytes. An optional hard cap applies to the combined
//! total of both backings.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use boundbuf_core::{Backing, BufferConfig};
use serde::Serialize;

use crate::buffer::BoundedBuffer;
use crate::error::{Error, Result};
use crate::tracking::PeakTracker;

/// Shared inner state for the ledger.
#[derive(Debug)]
struct LedgerInner {
    cap: Option<usize>,
    used: AtomicUsize,
    managed: AtomicUsize,
    external: AtomicUsize,
    peak: PeakTracker,
}

impl LedgerInner {
    fn new(cap: Option<usize>) -> Self {
        Self {
            cap,
            used: AtomicUsize::new(0),
            managed: AtomicUsize::new(0),
            external: AtomicUsize::new(0),
            peak: PeakTracker::new(),
        }
    }

    fn counter(&self, backing: Backing) -> &AtomicUsize {
        match backing {
            Backing::Managed => &self.managed,
            Backing::External => &self.external,
        }
    }

    fn try_acquire(&self, bytes: usize, backing: Backing) -> bool {
        loop {
            let cur = self.used.load(Ordering::Relaxed);
            let next = cur.saturating_add(bytes);
            if self.cap.is_some_and(|cap| next > cap) {
                return false;
            }
            if self
                .used
                .compare_exchange(cur, next, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                self.counter(backing).fetch_add(bytes, Ordering::AcqRel);
                self.peak.record_used(next);
                return true;
            }
        }
    }

    fn release(&self, bytes: usize, backing: Backing) {
        self.counter(backing).fetch_sub(bytes, Ordering::AcqRel);
        self.used.fetch_sub(bytes, Ordering::AcqRel);
    }
}

/// Point-in-time view of the ledger, printable as JSON by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerUsage {
    pub managed_bytes: usize,
    pub external_bytes: usize,
    pub used_bytes: usize,
    pub peak_bytes: usize,
    pub cap_bytes: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AllocationLedger {
    inner: Arc<LedgerInner>,
}

impl AllocationLedger {
    pub fn new(cap_bytes: Option<usize>) -> Self {
        Self {
            inner: Arc::new(LedgerInner::new(cap_bytes)),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Attempt to charge `bytes` to `backing`. Returns a guard on success.
    pub fn try_acquire(
        &self,
        bytes: usize,
        backing: Backing,
        tag: &'static str,
    ) -> Option<LedgerGuard> {
        if bytes > 0 && !self.inner.try_acquire(bytes, backing) {
            return None;
        }
        Some(LedgerGuard {
            inner: Arc::clone(&self.inner),
            bytes,
            backing,
            tag,
        })
    }

    pub fn used_bytes(&self) -> usize {
        self.inner.used.load(Ordering::Relaxed)
    }

    pub fn bytes_for(&self, backing: Backing) -> usize {
        self.inner.counter(backing).load(Ordering::Relaxed)
    }

    pub fn peak_bytes(&self) -> usize {
        self.inner.peak.peak()
    }

    pub fn cap_bytes(&self) -> Option<usize> {
        self.inner.cap
    }

    pub fn usage(&self) -> LedgerUsage {
        LedgerUsage {
            managed_bytes: self.bytes_for(Backing::Managed),
            external_bytes: self.bytes_for(Backing::External),
            used_bytes: self.used_bytes(),
            peak_bytes: self.peak_bytes(),
            cap_bytes: self.cap_bytes(),
        }
    }
}

/// RAII guard that accounts for a number of bytes.
/// Dropping it returns bytes to the ledger.
#[derive(Debug)]
pub struct LedgerGuard {
    inner: Arc<LedgerInner>,
    bytes: usize,
    backing: Backing,
    tag: &'static str,
}

impl LedgerGuard {
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    pub fn backing(&self) -> Backing {
        self.backing
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }
}

impl Drop for LedgerGuard {
    fn drop(&mut self) {
        if self.bytes > 0 {
            self.inner.release(self.bytes, self.backing);
            // NOTE: do not log here to keep drop path fast.
            self.bytes = 0;
        }
    }
}

/// A buffer whose storage is charged to a ledger for as long as it lives.
#[derive(Debug)]
pub struct TrackedBuffer<T> {
    // Dropped first, so the ledger never reports less than is allocated.
    buf: BoundedBuffer<T>,
    guard: LedgerGuard,
}

impl<T> TrackedBuffer<T> {
    /// Current accounted size (bytes).
    pub fn accounted_bytes(&self) -> usize {
        self.guard.bytes()
    }

    pub fn into_inner(self) -> (BoundedBuffer<T>, LedgerGuard) {
        (self.buf, self.guard)
    }
}

impl<T> Deref for TrackedBuffer<T> {
    type Target = BoundedBuffer<T>;
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<T> DerefMut for TrackedBuffer<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

/// Hands out ledger-tracked buffers shaped by a [`BufferConfig`].
#[derive(Debug, Clone)]
pub struct BufferAllocator {
    config: BufferConfig,
    ledger: AllocationLedger,
}

impl BufferAllocator {
    pub fn new(config: BufferConfig) -> Result<Self> {
        config.validate()?;
        let ledger = AllocationLedger::new(config.ledger_cap_bytes);
        Ok(Self { config, ledger })
    }

    /// Allocate with the configured capacity and backing.
    pub fn allocate<T: Clone + Default>(&self, tag: &'static str) -> Result<TrackedBuffer<T>> {
        self.allocate_with(self.config.capacity, self.config.backing, tag)
    }

    pub fn allocate_with<T: Clone + Default>(
        &self,
        capacity: usize,
        backing: Backing,
        tag: &'static str,
    ) -> Result<TrackedBuffer<T>> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        let requested = capacity.saturating_mul(std::mem::size_of::<T>());
        let guard = self
            .ledger
            .try_acquire(requested, backing, tag)
            .ok_or_else(|| Error::BudgetExceeded {
                tag,
                requested,
                capacity: self.ledger.cap_bytes().unwrap_or(usize::MAX),
                used: self.ledger.used_bytes(),
            })?;
        let buf = BoundedBuffer::with_backing(capacity, backing)?;
        Ok(TrackedBuffer { buf, guard })
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    pub fn ledger(&self) -> &AllocationLedger {
        &self.ledger
    }
}
