//! Plain copy path for inputs that need no rewriting.

use std::io::{self, Read, Write};

use crate::error::CatError;

/// Copies `input` to `output` unchanged, `buf_size` bytes at a time.
///
/// Each block read is written in full before the next read. Use this when
/// [`FormatOptions::is_plain`](crate::FormatOptions::is_plain) holds; it does
/// not touch any [`Transformer`](crate::Transformer) state.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// [`CatError::Read`] if reading fails, [`CatError::Write`] if writing fails,
/// [`CatError::InvalidConfig`] if `buf_size` is zero.
///
/// # Example
///
/// ```
/// let mut out = Vec::new();
/// let n = catrs::copy_plain(&mut &b"as is\n"[..], &mut out, 2)?;
/// assert_eq!(n, 6);
/// assert_eq!(out, b"as is\n");
/// # Ok::<(), catrs::CatError>(())
/// ```
pub fn copy_plain<R, W>(input: &mut R, output: &mut W, buf_size: usize) -> Result<u64, CatError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    if buf_size == 0 {
        return Err(CatError::InvalidConfig {
            message: "buffer size must be non-zero",
        });
    }

    let mut buf = vec![0u8; buf_size];
    let mut total = 0u64;

    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CatError::Read(e)),
        };

        output.write_all(&buf[..n]).map_err(CatError::Write)?;
        total += n as u64;
    }

    output.flush().map_err(CatError::Write)?;
    log::trace!("copied {total} bytes");
    Ok(total)
}
