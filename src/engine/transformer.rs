//! Core transformation engine - Transformer with streaming API.
//!
//! This module implements the single-pass rewrite behind `cat -vTEnbs`:
//!
//! - [`Transformer`] - Stateful engine that rewrites one input at a time
//! - `transform()` - Stream one input from a source to a sink
//! - `finish()` - Resolve a carriage return left pending at the end of the session
//!
//! # Example
//!
//! ```
//! use catrs::{CatConfig, FormatOptions, Transformer};
//!
//! let config = CatConfig::default().with_options(FormatOptions::new().with_number(true));
//! let mut cat = Transformer::new(config);
//!
//! let mut out = Vec::new();
//! cat.transform(&mut &b"first\n"[..], &mut out)?;
//! cat.transform(&mut &b"second\n"[..], &mut out)?;
//! cat.finish(&mut out)?;
//!
//! assert_eq!(out, b"     1\tfirst\n     2\tsecond\n");
//! # Ok::<(), catrs::CatError>(())
//! ```

use std::io::{self, Cursor, Write};

use bytes::Bytes;

use super::quote::notation;
use crate::buffer::{InputChunk, OutputChunk};
use crate::config::{CatConfig, FormatOptions};
use crate::error::CatError;
use crate::label::LineNumber;
use crate::source::ByteSource;
use crate::state::{BlankRun, TransformState};

/// A stateful engine that concatenates inputs while rewriting them.
///
/// `Transformer` reads each input in chunks of at most `input_size` bytes and
/// writes output in chunks of `output_size` bytes. Memory use is bounded by
/// those two sizes no matter how long a line is.
///
/// # State
///
/// The blank-run position, the pending-CR flag and the line counter live in
/// the `Transformer` and carry over from one `transform()` call to the next.
/// Successive inputs therefore behave as one continuous stream: a line split
/// across two files gets one number, and a blank run spanning files is
/// squeezed as a whole.
///
/// # Errors
///
/// - [`CatError::Read`]: the current input failed. Output produced so far
///   was written; the caller may continue with the next input.
/// - [`CatError::Write`]: the sink failed. The session must stop.
///
/// # Example
///
/// ```
/// use catrs::{CatConfig, FormatOptions, Transformer};
///
/// let opts = FormatOptions::new().with_squeeze_blank(true).with_show_ends(true);
/// let mut cat = Transformer::new(CatConfig::default().with_options(opts));
///
/// let out = cat.transform_bytes(&b"a\n\n\n\nb\n"[..])?;
/// assert_eq!(&out[..], b"a$\n$\nb$\n");
/// # Ok::<(), catrs::CatError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Transformer {
    config: CatConfig,
    state: TransformState,
    line_number: LineNumber,
}

impl Transformer {
    /// Creates a new transformer at the start of a session.
    ///
    /// # Example
    ///
    /// ```
    /// use catrs::{CatConfig, Transformer};
    ///
    /// let cat = Transformer::new(CatConfig::default());
    /// ```
    pub fn new(config: CatConfig) -> Self {
        Self {
            config,
            state: TransformState::new(),
            line_number: LineNumber::new(),
        }
    }

    /// Replaces the line counter, e.g. to resume numbering of an earlier
    /// session.
    ///
    /// # Example
    ///
    /// ```
    /// use catrs::{CatConfig, FormatOptions, LineNumber, Transformer};
    ///
    /// let config = CatConfig::default().with_options(FormatOptions::new().with_number(true));
    /// let mut cat = Transformer::new(config).with_line_number(LineNumber::starting_at(41).unwrap());
    ///
    /// let out = cat.transform_bytes(&b"x\n"[..])?;
    /// assert_eq!(&out[..], b"    42\tx\n");
    /// # Ok::<(), catrs::CatError>(())
    /// ```
    pub fn with_line_number(mut self, line_number: LineNumber) -> Self {
        self.line_number = line_number;
        self
    }

    /// Streams one input to `output`, rewriting it on the way.
    ///
    /// Returns once `input` reports end of stream. All output produced for
    /// this input has been written to `output` (and `output` flushed) when
    /// this returns, whether it succeeds or fails with a read error.
    ///
    /// Before blocking on a read, buffered output is written out unless
    /// [`ByteSource::available`] reports more input ready. A source that
    /// answers [`io::ErrorKind::Unsupported`] is not asked again during this
    /// call.
    ///
    /// # Errors
    ///
    /// [`CatError::InvalidConfig`] if either I/O size is zero (nothing is
    /// read or written), [`CatError::Read`] if reading (or probing) `input`
    /// fails, [`CatError::Write`] if writing to `output` fails.
    pub fn transform<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<(), CatError>
    where
        R: ByteSource + ?Sized,
        W: Write + ?Sized,
    {
        self.config.validate()?;

        let opts = *self.config.options();
        let number_all = opts.number && !opts.number_nonblank;

        let mut inbuf = InputChunk::new(self.config.input_size());
        let mut out = OutputChunk::new(self.config.output_size());
        let mut use_hint = true;

        loop {
            // Consume terminators until the first byte of line content.
            let ch = loop {
                out.maybe_flush(output)?;

                if inbuf.is_exhausted() {
                    let mut input_pending = false;
                    if use_hint {
                        match input.available() {
                            Ok(n) => input_pending = n > 0,
                            Err(e) if e.kind() == io::ErrorKind::Unsupported => {
                                log::debug!("availability hint unsupported, flushing before every read");
                                use_hint = false;
                            }
                            Err(e) => return read_failed(e, &mut out, output),
                        }
                    }

                    if !input_pending {
                        out.write_pending(output)?;
                    }

                    match inbuf.fill(input) {
                        Ok(0) => {
                            out.write_pending(output)?;
                            return Ok(());
                        }
                        Ok(n) => log::trace!("read {n} bytes"),
                        Err(e) => return read_failed(e, &mut out, output),
                    }
                } else {
                    // A genuine terminator, not the sentinel.
                    self.state.blank_run = self.state.blank_run.after_newline();
                    let squeezed =
                        opts.squeeze_blank && self.state.blank_run == BlankRun::Repeated;

                    if !squeezed {
                        if number_all && self.state.blank_run.is_blank_line() {
                            self.line_number.advance();
                            out.extend(self.line_number.as_bytes());
                        }

                        if opts.show_ends {
                            if self.state.pending_cr {
                                out.extend(b"^M");
                                self.state.pending_cr = false;
                            }
                            out.push(b'$');
                        }

                        out.push(b'\n');
                    }
                }

                let ch = inbuf.next_byte();
                if ch != b'\n' {
                    break ch;
                }
            };

            // A blank-line label may already fill the slack; the content label needs room too.
            out.maybe_flush(output)?;

            // The CR held back at the end of the last read was not part of CRLF.
            if self.state.pending_cr {
                out.push(b'\r');
                self.state.pending_cr = false;
            }

            if opts.numbers_lines() && self.state.blank_run.at_line_start() {
                self.line_number.advance();
                out.extend(self.line_number.as_bytes());
            }

            if opts.show_nonprinting {
                scan_quoted(ch, &opts, &mut inbuf, &mut out, output)?;
            } else {
                scan_plain(ch, &opts, &mut inbuf, &mut out, output, &mut self.state)?;
            }

            self.state.blank_run = BlankRun::MidLine;
        }
    }

    /// Ends the session.
    ///
    /// A carriage return held back because the input ended right after it
    /// (with `show_ends` active) is written as a plain `\r`. Numbering and
    /// blank-run state are left untouched; use [`reset`](Self::reset) to
    /// start over.
    ///
    /// # Example
    ///
    /// ```
    /// use catrs::{CatConfig, FormatOptions, Transformer};
    ///
    /// let config = CatConfig::default().with_options(FormatOptions::new().with_show_ends(true));
    /// let mut cat = Transformer::new(config);
    ///
    /// let mut out = Vec::new();
    /// cat.transform(&mut &b"a\r"[..], &mut out)?;
    /// assert_eq!(out, b"a");
    ///
    /// cat.finish(&mut out)?;
    /// assert_eq!(out, b"a\r");
    /// # Ok::<(), catrs::CatError>(())
    /// ```
    pub fn finish<W: Write + ?Sized>(&mut self, output: &mut W) -> Result<(), CatError> {
        if std::mem::take(&mut self.state.pending_cr) {
            output
                .write_all(b"\r")
                .and_then(|()| output.flush())
                .map_err(CatError::Write)?;
        }
        Ok(())
    }

    /// Transforms an in-memory buffer as one input of the session.
    ///
    /// This does not call [`finish`](Self::finish): a trailing `\r` under
    /// `show_ends` stays pending for the next input.
    ///
    /// # Example
    ///
    /// ```
    /// use catrs::{CatConfig, FormatOptions, Transformer};
    ///
    /// let config = CatConfig::default().with_options(FormatOptions::new().with_show_tabs(true));
    /// let mut cat = Transformer::new(config);
    ///
    /// let out = cat.transform_bytes(&b"a\tb\n\t\n"[..])?;
    /// assert_eq!(&out[..], b"a^Ib\n^I\n");
    /// # Ok::<(), catrs::CatError>(())
    /// ```
    pub fn transform_bytes(&mut self, data: impl Into<Bytes>) -> Result<Bytes, CatError> {
        let mut input = Cursor::new(data.into());
        let mut output = Vec::new();
        self.transform(&mut input, &mut output)?;
        Ok(Bytes::from(output))
    }

    /// Resets the session: blank-run state, pending CR and line counter.
    pub fn reset(&mut self) {
        self.state = TransformState::new();
        self.line_number = LineNumber::new();
    }

    /// Returns the state carried into the next input.
    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Returns the line counter; it holds the last number printed.
    pub fn line_number(&self) -> &LineNumber {
        &self.line_number
    }

    /// Returns the configuration used by this transformer.
    pub fn config(&self) -> &CatConfig {
        &self.config
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(CatConfig::default())
    }
}

/// Writes out what is buffered and reports the read failure.
fn read_failed<W: Write + ?Sized>(
    err: io::Error,
    out: &mut OutputChunk,
    sink: &mut W,
) -> Result<(), CatError> {
    log::debug!("read failed with {} bytes buffered: {err}", out.len());
    out.write_pending(sink)?;
    Err(CatError::Read(err))
}

/// Copies line content up to the next `\n` without `-v` quoting.
fn scan_plain<W: Write + ?Sized>(
    mut ch: u8,
    opts: &FormatOptions,
    inbuf: &mut InputChunk,
    out: &mut OutputChunk,
    sink: &mut W,
    state: &mut TransformState,
) -> Result<(), CatError> {
    while ch != b'\n' {
        out.maybe_flush(sink)?;

        if ch == b'\t' && opts.show_tabs {
            out.extend(b"^I");
        } else if ch == b'\r' && opts.show_ends && inbuf.peek() == b'\n' {
            if inbuf.at_sentinel() {
                // Decided by the first byte of the next read.
                state.pending_cr = true;
            } else {
                out.extend(b"^M");
            }
        } else {
            out.push(ch);
        }

        ch = inbuf.next_byte();
    }
    Ok(())
}

/// Copies line content up to the next `\n` in `^` and `M-` notation.
fn scan_quoted<W: Write + ?Sized>(
    mut ch: u8,
    opts: &FormatOptions,
    inbuf: &mut InputChunk,
    out: &mut OutputChunk,
    sink: &mut W,
) -> Result<(), CatError> {
    while ch != b'\n' {
        out.maybe_flush(sink)?;

        if ch == b'\t' && !opts.show_tabs {
            out.push(b'\t');
        } else {
            out.extend(notation(ch).as_bytes());
        }

        ch = inbuf.next_byte();
    }
    Ok(())
}
