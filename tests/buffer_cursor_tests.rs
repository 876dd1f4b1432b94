//! Cursor protocol tests for BoundedBuffer

use boundbuf_core::CursorState;
use boundbuf_io::VecSink;
use boundbuf_mem::{BoundedBuffer, Error};
use proptest::prelude::*;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn test_hello_scenario() {
    let mut buf = BoundedBuffer::<char>::new(10).unwrap();

    buf.append("hello").unwrap();
    assert_eq!((buf.position(), buf.limit()), (5, 10));

    buf.flip();
    assert_eq!((buf.position(), buf.limit()), (0, 5));

    assert_eq!(buf.get(5).unwrap(), chars("hello"));
    assert_eq!(buf.position(), 5);

    // Rewind re-exposes the same window without touching the limit
    buf.rewind();
    assert_eq!((buf.position(), buf.limit()), (0, 5));
    assert_eq!(buf.get(5).unwrap(), chars("hello"));

    buf.clear();
    assert_eq!((buf.position(), buf.limit()), (0, 10));
}

#[test]
fn test_mark_reset_scenario() {
    let mut buf = BoundedBuffer::<char>::new(10).unwrap();
    buf.clear();
    buf.append("abc").unwrap();
    assert_eq!(buf.position(), 3);

    buf.mark_position();
    buf.append("de").unwrap();
    assert_eq!(buf.position(), 5);

    buf.reset().unwrap();
    assert_eq!(buf.position(), 3);
}

#[test]
fn test_clear_does_not_erase() {
    let mut buf = BoundedBuffer::<char>::new(10).unwrap();
    buf.put(&['h', 'i']).unwrap();
    buf.clear();

    assert_eq!(buf.remaining(), buf.capacity());
    assert_eq!(&buf.storage()[..2], &['h', 'i']);

    // Overwriting is the only way stale data goes away
    buf.append("x").unwrap();
    assert_eq!(&buf.storage()[..2], &['x', 'i']);
}

#[test]
fn test_clear_restores_initial_state_from_anywhere() {
    let mut buf = BoundedBuffer::<u8>::new(8).unwrap();
    buf.append(b"abcdef").unwrap();
    buf.flip();
    buf.get(2).unwrap();
    buf.mark_position();
    buf.set_limit(4).unwrap();

    buf.clear();
    assert_eq!(
        buf.snapshot(),
        CursorState {
            position: 0,
            limit: 8,
            capacity: 8,
            mark: None
        }
    );
}

#[test]
fn test_flip_vs_rewind() {
    let mut a = BoundedBuffer::<u8>::new(8).unwrap();
    let mut b = BoundedBuffer::<u8>::new(8).unwrap();
    a.append(b"abc").unwrap();
    b.append(b"abc").unwrap();

    a.flip();
    b.rewind();

    // Both zero the position; only flip moves the limit
    assert_eq!(a.position(), 0);
    assert_eq!(b.position(), 0);
    assert_eq!(a.limit(), 3);
    assert_eq!(b.limit(), 8);
}

#[test]
fn test_reset_without_mark() {
    let mut buf = BoundedBuffer::<u8>::new(4).unwrap();
    assert!(matches!(buf.reset(), Err(Error::InvalidMark)));
}

#[test]
fn test_failed_ops_leave_state_unchanged() {
    let mut buf = BoundedBuffer::<u8>::new(4).unwrap();
    buf.append(b"abc").unwrap();
    let before = buf.snapshot();

    assert!(matches!(buf.put(&[1, 2]), Err(Error::Overflow { .. })));
    assert_eq!(buf.snapshot(), before);

    assert!(matches!(buf.get(2), Err(Error::Underflow { .. })));
    assert_eq!(buf.snapshot(), before);

    assert!(buf.reset().is_err());
    assert_eq!(buf.snapshot(), before);

    assert!(buf.set_position(5).is_err());
    assert_eq!(buf.snapshot(), before);
}

/// One cursor-level call against a 16-element buffer.
#[derive(Debug, Clone)]
enum Op {
    Put(usize),
    Get(usize),
    Flip,
    Rewind,
    Clear,
    Mark,
    Reset,
    SetPosition(usize),
    SetLimit(usize),
    Compact,
    Drain(usize),
}

const CAPACITY: usize = 16;

fn op() -> impl Strategy<Value = Op> {
    // Sizes reach past the capacity so overflow/underflow paths get hit
    prop_oneof![
        (0..=CAPACITY + 4).prop_map(Op::Put),
        (0..=CAPACITY + 4).prop_map(Op::Get),
        Just(Op::Flip),
        Just(Op::Rewind),
        Just(Op::Clear),
        Just(Op::Mark),
        Just(Op::Reset),
        (0..=CAPACITY + 4).prop_map(Op::SetPosition),
        (0..=CAPACITY + 4).prop_map(Op::SetLimit),
        Just(Op::Compact),
        (0..=CAPACITY).prop_map(Op::Drain),
    ]
}

fn apply(buf: &mut BoundedBuffer<u8>, op: &Op) -> Result<(), Error> {
    match *op {
        Op::Put(n) => buf.put(&vec![7; n]),
        Op::Get(n) => buf.get(n).map(|_| ()),
        Op::Flip => {
            buf.flip();
            Ok(())
        }
        Op::Rewind => {
            buf.rewind();
            Ok(())
        }
        Op::Clear => {
            buf.clear();
            Ok(())
        }
        Op::Mark => {
            buf.mark_position();
            Ok(())
        }
        Op::Reset => buf.reset(),
        Op::SetPosition(n) => buf.set_position(n),
        Op::SetLimit(n) => buf.set_limit(n),
        Op::Compact => {
            buf.compact();
            Ok(())
        }
        // A sink with room for n elements; anything more is an overflow
        Op::Drain(n) => buf.transfer_into(&mut VecSink::<u8>::bounded(n)).map(|_| ()),
    }
}

proptest! {
    #[test]
    fn prop_cursors_stay_ordered(ops in prop::collection::vec(op(), 1..=64)) {
        let mut buf = BoundedBuffer::<u8>::new(CAPACITY).unwrap();
        for op in &ops {
            let before = buf.snapshot();
            let stored = buf.storage().to_vec();
            if apply(&mut buf, op).is_err() {
                prop_assert_eq!(buf.snapshot(), before, "{:?} failed but moved the cursors", op);
                prop_assert_eq!(buf.storage(), stored.as_slice());
            }
            prop_assert!(buf.snapshot().is_consistent(), "broken state after {:?}: {}", op, buf);
        }
    }

    #[test]
    fn prop_put_flip_get_returns_same_items(items in prop::collection::vec(any::<u32>(), 0..64)) {
        let mut buf = BoundedBuffer::<u32>::new(64).unwrap();
        buf.put(&items).unwrap();
        buf.flip();
        prop_assert_eq!(buf.remaining(), items.len());
        prop_assert_eq!(buf.get(items.len()).unwrap(), items);
        prop_assert!(!buf.has_remaining());
    }
}
