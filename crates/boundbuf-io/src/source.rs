//! Sources over `std::io` readers.

use std::io::{self, BufRead, Read};

use boundbuf_core::Source;

/// Byte source over any reader. Retries reads interrupted by signals.
pub struct ReaderSource<R: Read> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Source<u8> for ReaderSource<R> {
    fn read_into(&mut self, region: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.inner.read(region) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

/// Char source decoding UTF-8 from a buffered reader.
///
/// Returns as soon as at least one char is decodable, so a line-buffered
/// terminal yields one line per call. A multi-byte sequence split across
/// reads is held back until complete.
pub struct Utf8Source<R: BufRead> {
    inner: R,
    pending: Vec<u8>,
}

impl<R: BufRead> Utf8Source<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: Vec::new(),
        }
    }

    /// Decode as many complete chars from `pending` as fit into `region`.
    fn decode_pending(&mut self, region: &mut [char]) -> io::Result<usize> {
        let valid = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(e) if e.valid_up_to() == 0 && e.error_len().is_some() => {
                return Err(invalid_utf8());
            }
            Err(e) => e.valid_up_to(),
        };
        let text = std::str::from_utf8(&self.pending[..valid]).map_err(|_| invalid_utf8())?;

        let mut count = 0;
        let mut used = 0;
        for (slot, ch) in region.iter_mut().zip(text.chars()) {
            *slot = ch;
            count += 1;
            used += ch.len_utf8();
        }
        self.pending.drain(..used);
        Ok(count)
    }
}

impl<R: BufRead> Source<char> for Utf8Source<R> {
    fn read_into(&mut self, region: &mut [char]) -> io::Result<usize> {
        if region.is_empty() {
            return Ok(0);
        }
        loop {
            let n = self.decode_pending(region)?;
            if n > 0 {
                return Ok(n);
            }
            let chunk = match self.inner.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if chunk.is_empty() {
                if self.pending.is_empty() {
                    return Ok(0);
                }
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input ended inside a UTF-8 sequence",
                ));
            }
            let taken = chunk.len();
            self.pending.extend_from_slice(chunk);
            self.inner.consume(taken);
        }
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "input is not valid UTF-8")
}
