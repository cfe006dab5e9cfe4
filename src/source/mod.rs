//! Byte sources with an optional availability hint.
//!
//! The engine flushes pending output before it blocks on a read, so a slow
//! producer still sees its output promptly. A source that can tell how many
//! bytes are ready without blocking lets the engine skip that flush.

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Stdin, StdinLock};

/// A readable byte stream.
///
/// [`available`](ByteSource::available) is a hint: the number of bytes a
/// `read` could return right now without blocking. The default answers
/// [`io::ErrorKind::Unsupported`], which makes the engine stop asking for the
/// rest of the input and flush before every read.
///
/// # Example
///
/// ```
/// use catrs::ByteSource;
///
/// let mut src: &[u8] = b"abc";
/// assert_eq!(src.available().unwrap(), 3);
/// ```
pub trait ByteSource: Read {
    /// Returns the number of bytes readable without blocking.
    fn available(&mut self) -> io::Result<usize> {
        Err(io::ErrorKind::Unsupported.into())
    }
}

impl ByteSource for File {}

impl ByteSource for Stdin {}

impl ByteSource for StdinLock<'_> {}

impl ByteSource for &[u8] {
    fn available(&mut self) -> io::Result<usize> {
        Ok(self.len())
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn available(&mut self) -> io::Result<usize> {
        let len = self.get_ref().as_ref().len() as u64;
        Ok(len.saturating_sub(self.position()) as usize)
    }
}

impl<R: Read> ByteSource for BufReader<R> {
    fn available(&mut self) -> io::Result<usize> {
        Ok(self.buffer().len())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn available(&mut self) -> io::Result<usize> {
        (**self).available()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn available(&mut self) -> io::Result<usize> {
        (**self).available()
    }
}
