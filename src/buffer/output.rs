//! Output chunk flushed to the sink in fixed-size writes.

use std::io::Write;

use bytes::{BufMut, BytesMut};

use crate::error::CatError;
use crate::label::MAX_DIGITS;

/// Room reserved beyond the output size for the widest unit appended
/// between two flush checks: a line-number label followed by `^M$\n`.
pub(crate) const OUTPUT_SLACK: usize = MAX_DIGITS + 1 + 4;

/// Accumulates transformed bytes and writes them out in `size`-byte slices.
///
/// The engine calls [`maybe_flush`](OutputChunk::maybe_flush) before every
/// append, so the buffer never holds more than `size + OUTPUT_SLACK` bytes.
#[derive(Debug)]
pub(crate) struct OutputChunk {
    buf: BytesMut,
    size: usize,
}

impl OutputChunk {
    /// Creates an empty chunk that writes `size` bytes at a time.
    pub(crate) fn new(size: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(size + OUTPUT_SLACK),
            size,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, byte: u8) {
        self.buf.put_u8(byte);
    }

    #[inline]
    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Number of bytes waiting to be written.
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// Writes whole `size`-byte slices while at least one is buffered, then
    /// moves the remainder to the front of the buffer.
    pub(crate) fn maybe_flush<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<(), CatError> {
        let used = self.buf.len();
        if used < self.size {
            return Ok(());
        }
        debug_assert!(used <= self.size + OUTPUT_SLACK, "output chunk overrun");

        let mut written = 0;
        while used - written >= self.size {
            sink.write_all(&self.buf[written..written + self.size])
                .map_err(CatError::Write)?;
            written += self.size;
        }

        // Keep the remainder
        self.buf.copy_within(written.., 0);
        self.buf.truncate(used - written);
        log::trace!("flushed {} bytes, {} kept", written, used - written);
        Ok(())
    }

    /// Writes everything buffered and flushes the sink.
    pub(crate) fn write_pending<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<(), CatError> {
        if self.buf.is_empty() {
            return Ok(());
        }

        sink.write_all(&self.buf).map_err(CatError::Write)?;
        sink.flush().map_err(CatError::Write)?;
        log::trace!("wrote {} pending bytes", self.buf.len());
        self.buf.clear();
        Ok(())
    }
}
