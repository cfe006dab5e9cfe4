//! Input chunk with a trailing newline sentinel.

use std::io;

use crate::source::ByteSource;

/// A fixed-size input buffer refilled from a [`ByteSource`].
///
/// After every successful fill the byte just past the valid data is forced
/// to `\n`. Scanning loops stop on `\n` only; reading that sentinel moves
/// the cursor past `end`, which is the single place exhaustion is detected.
#[derive(Debug)]
pub(crate) struct InputChunk {
    data: Vec<u8>,
    size: usize,
    end: usize,
    cursor: usize,
}

impl InputChunk {
    /// Creates an empty chunk that reads at most `size` bytes at a time.
    ///
    /// The chunk starts exhausted so the first use triggers a fill.
    pub(crate) fn new(size: usize) -> Self {
        Self {
            data: vec![0; size + 1],
            size,
            end: 0,
            cursor: 1,
        }
    }

    /// Returns `true` once the sentinel has been consumed.
    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.cursor > self.end
    }

    /// Refills the chunk from `src`.
    ///
    /// Returns the number of bytes read; `0` means end of stream and leaves
    /// the chunk exhausted. Interrupted reads are retried.
    pub(crate) fn fill<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> io::Result<usize> {
        debug_assert!(self.is_exhausted(), "refill before the sentinel was consumed");

        let n = loop {
            match src.read(&mut self.data[..self.size]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if n > 0 {
            self.cursor = 0;
            self.end = n;
            self.data[n] = b'\n';
        }
        Ok(n)
    }

    /// Consumes and returns the byte under the cursor.
    #[inline]
    pub(crate) fn next_byte(&mut self) -> u8 {
        let byte = self.data[self.cursor];
        self.cursor += 1;
        byte
    }

    /// Returns the byte under the cursor without consuming it.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.data[self.cursor]
    }

    /// Returns `true` if the cursor sits on the sentinel rather than on
    /// genuine data.
    #[inline]
    pub(crate) fn at_sentinel(&self) -> bool {
        self.cursor == self.end
    }
}
