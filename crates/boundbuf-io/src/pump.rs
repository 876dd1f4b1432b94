//! Copy loop: fill the buffer, flip, drain it into a sink, clear, repeat.

use boundbuf_core::{Sink, Source};
use boundbuf_mem::{BoundedBuffer, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// Fill/drain rounds that moved at least one element.
    pub cycles: usize,
    /// Elements delivered to the sink.
    pub elements: usize,
}

/// Move everything `source` produces into `sink` through `buf`, one buffer
/// load at a time, until the source reports end of input.
///
/// The buffer is cleared before every fill, so anything it held on entry is
/// discarded. Source and sink errors end the loop and propagate unchanged.
pub fn pump<T, S, K>(buf: &mut BoundedBuffer<T>, source: &mut S, sink: &mut K) -> Result<PumpStats>
where
    S: Source<T> + ?Sized,
    K: Sink<T> + ?Sized,
{
    let mut stats = PumpStats::default();
    loop {
        buf.clear();
        if buf.fill_from(source)? == 0 {
            break;
        }
        buf.flip();
        stats.elements += buf.transfer_into(sink)?;
        stats.cycles += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(cycle = stats.cycles, total = stats.elements, "pump cycle");
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{SliceSource, VecSink};

    #[test]
    fn pump_moves_everything_in_buffer_sized_rounds() {
        let mut buf = BoundedBuffer::<char>::new(4).unwrap();
        let mut src = SliceSource::from_text("hello world");
        let mut sink = VecSink::<char>::new();
        let stats = pump(&mut buf, &mut src, &mut sink).unwrap();
        assert_eq!(sink.text(), "hello world");
        assert_eq!(stats, PumpStats { cycles: 3, elements: 11 });
    }

    #[test]
    fn pump_on_empty_source_does_nothing() {
        let mut buf = BoundedBuffer::<u8>::new(4).unwrap();
        let mut src = SliceSource::<u8>::new(Vec::new());
        let mut sink = VecSink::<u8>::new();
        let stats = pump(&mut buf, &mut src, &mut sink).unwrap();
        assert_eq!(stats, PumpStats::default());
        assert_eq!(sink.calls(), 0);
    }
}
