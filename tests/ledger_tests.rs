//! Allocation ledger tests

use boundbuf_core::{Backing, BufferConfig};
use boundbuf_mem::{AllocationLedger, BufferAllocator, Error};

#[test]
fn test_ledger_acquire_release() {
    let ledger = AllocationLedger::new(Some(1024 * 1024)); // 1MB

    // Initially nothing charged
    assert_eq!(ledger.used_bytes(), 0);

    let guard = ledger
        .try_acquire(100 * 1024, Backing::Managed, "test")
        .expect("Acquire failed");
    assert_eq!(ledger.used_bytes(), 100 * 1024);
    assert_eq!(guard.bytes(), 100 * 1024);
    assert_eq!(guard.backing(), Backing::Managed);

    drop(guard);
    assert_eq!(ledger.used_bytes(), 0);
}

#[test]
fn test_ledger_cap_covers_both_backings() {
    let ledger = AllocationLedger::new(Some(500));

    let managed = ledger
        .try_acquire(300, Backing::Managed, "heap")
        .expect("managed acquire failed");
    // External bytes still count against the cap
    assert!(ledger.try_acquire(300, Backing::External, "direct").is_none());
    assert_eq!(ledger.bytes_for(Backing::External), 0);

    drop(managed);
    let _external = ledger
        .try_acquire(300, Backing::External, "direct")
        .expect("acquire after release failed");
    assert_eq!(ledger.bytes_for(Backing::External), 300);
    assert_eq!(ledger.bytes_for(Backing::Managed), 0);
}

#[test]
fn test_zero_byte_acquire_always_succeeds() {
    let ledger = AllocationLedger::new(Some(0));
    let guard = ledger.try_acquire(0, Backing::Managed, "empty").unwrap();
    assert_eq!(guard.bytes(), 0);
}

#[test]
fn test_allocator_sizes_by_element_type() {
    let alloc = BufferAllocator::new(BufferConfig::with_capacity(10)).unwrap();
    let chars = alloc.allocate::<char>("chars").unwrap();
    assert_eq!(chars.accounted_bytes(), 10 * std::mem::size_of::<char>());
    assert_eq!(chars.capacity(), 10);
}

#[test]
fn test_backing_has_no_behavioral_effect() {
    let alloc = BufferAllocator::new(BufferConfig::with_capacity(8)).unwrap();
    let mut managed = alloc
        .allocate_with::<u8>(8, Backing::Managed, "m")
        .unwrap();
    let mut external = alloc
        .allocate_with::<u8>(8, Backing::External, "e")
        .unwrap();

    for buf in [&mut *managed, &mut *external] {
        buf.append(b"abc").unwrap();
        buf.flip();
        assert_eq!(buf.get(3).unwrap(), b"abc".to_vec());
        buf.clear();
        assert_eq!(buf.remaining(), 8);
    }
    assert_eq!(managed.snapshot(), external.snapshot());
    assert_eq!(managed.backing(), Backing::Managed);
    assert_eq!(external.backing(), Backing::External);
}

#[test]
fn test_allocator_reports_budget_exceeded() {
    let cfg = BufferConfig {
        ledger_cap_bytes: Some(16),
        ..BufferConfig::with_capacity(32)
    };
    let alloc = BufferAllocator::new(cfg).unwrap();
    match alloc.allocate::<u8>("too-big") {
        Err(Error::BudgetExceeded {
            requested, capacity, ..
        }) => {
            assert_eq!(requested, 32);
            assert_eq!(capacity, 16);
        }
        other => panic!("expected BudgetExceeded, got {:?}", other.map(|b| b.capacity())),
    }
    assert_eq!(alloc.ledger().used_bytes(), 0);
}

#[test]
fn test_allocator_rejects_invalid_config() {
    assert!(matches!(
        BufferAllocator::new(BufferConfig::with_capacity(0)),
        Err(Error::Config(_))
    ));
}
