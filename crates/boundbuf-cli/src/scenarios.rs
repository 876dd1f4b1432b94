//! The three demo scenarios, written against `Write`/`BufRead` so tests can
//! run them without a terminal.

use std::io::{BufRead, Write};
use std::num::NonZeroUsize;

use boundbuf_core::{Backing, BufferConfig};
use boundbuf_io::{pump, ChunkedSink, PumpStats, Utf8Sink, Utf8Source};
use boundbuf_mem::{BoundedBuffer, BufferAllocator, LedgerUsage, Result};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Walk a 10-char buffer through put / flip / read / rewind / clear and
/// mark / reset, reporting the cursors after each step.
pub fn positional<W: Write>(out: &mut W, format: Format) -> Result<()> {
    let mut buffer = BoundedBuffer::<char>::new(10)?;
    let mut target = BoundedBuffer::<char>::new(10)?;

    report(out, format, &buffer, "initial state")?;
    buffer.append("hello")?;
    report(out, format, &buffer, "after putting 'hello'")?;
    buffer.flip();
    report(out, format, &buffer, "after flip()")?;
    buffer.transfer_into(&mut target)?;
    report(out, format, &buffer, "after reading from buffer")?;
    buffer.rewind();
    report(out, format, &buffer, "after rewind()")?;
    buffer.clear();
    report(out, format, &buffer, "after clear()")?;
    buffer.append("abc")?;
    report(out, format, &buffer, "after putting 'abc'")?;
    buffer.mark_position();
    buffer.append("de")?;
    report(out, format, &buffer, "after putting 'de'")?;
    buffer.reset()?;
    report(out, format, &buffer, "after reset()")?;
    Ok(())
}

fn report<W: Write>(
    out: &mut W,
    format: Format,
    buffer: &BoundedBuffer<char>,
    step: &str,
) -> Result<()> {
    let contents = render(buffer.storage());
    match format {
        Format::Text => writeln!(out, "{step:>25} ------> {buffer}, contents: {contents}")?,
        Format::Json => {
            let line = json!({
                "step": step,
                "state": buffer.snapshot(),
                "contents": contents,
            });
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Unwritten slots print as '.', so stale and fresh data are both visible.
fn render(storage: &[char]) -> String {
    storage
        .iter()
        .map(|&c| if c == '\0' { '.' } else { c })
        .collect()
}

/// Copy `input` to `output` through a char buffer until end of input.
pub fn echo<R: BufRead, W: Write>(cfg: &BufferConfig, input: R, output: W) -> Result<PumpStats> {
    let mut buffer = BoundedBuffer::<char>::from_config(cfg)?;
    let mut source = Utf8Source::new(input);
    let mut sink = Utf8Sink::new(output);
    match cfg.transfer_chunk.and_then(NonZeroUsize::new) {
        Some(chunk) => pump(&mut buffer, &mut source, &mut ChunkedSink::new(sink, chunk)),
        None => pump(&mut buffer, &mut source, &mut sink),
    }
}

/// Allocate one managed and one external buffer through the ledger and
/// report usage before, after each allocation, and after both are dropped.
pub fn backing<W: Write>(cfg: &BufferConfig, out: &mut W, format: Format) -> Result<()> {
    let allocator = BufferAllocator::new(cfg.clone())?;
    let ledger = allocator.ledger();

    usage(out, format, 0, ledger.usage())?;
    let managed = allocator.allocate_with::<u8>(cfg.capacity, Backing::Managed, "managed")?;
    usage(out, format, 1, ledger.usage())?;
    let external = allocator.allocate_with::<u8>(cfg.capacity, Backing::External, "external")?;
    usage(out, format, 2, ledger.usage())?;
    drop(managed);
    drop(external);
    usage(out, format, 3, ledger.usage())?;
    Ok(())
}

fn usage<W: Write>(out: &mut W, format: Format, id: usize, u: LedgerUsage) -> Result<()> {
    match format {
        Format::Text => writeln!(
            out,
            "{id}: managed {} B, external {} B, used {} B, peak {} B",
            u.managed_bytes, u.external_bytes, u.used_bytes, u.peak_bytes
        )?,
        Format::Json => writeln!(out, "{}", json!({ "id": id, "usage": u }))?,
    }
    Ok(())
}
