//! catrs
//!
//! Streaming `cat(1)` transformations for Rust.
//!
//! `catrs` concatenates byte streams to one output while optionally:
//!
//! - showing non-printing bytes in `^` and `M-` notation
//! - rendering TAB as `^I`
//! - marking line ends with `$` (and CRLF as `^M$`)
//! - numbering all lines, or non-blank lines only
//! - squeezing runs of blank lines to one
//!
//! The engine makes a single pass with two fixed-size buffers, so memory use
//! does not depend on input size or line length. State (line counter,
//! blank-run position, a pending CR) is carried across reads and across
//! inputs, so several inputs read as one continuous stream.
//!
//! The crate intentionally:
//! - does NOT open files or parse arguments (see the `catrs` binary)
//! - does NOT decode text: it works on bytes, lines end at `\n`
//! - does NOT spawn threads
//!
//! # Example
//!
//! ```
//! use catrs::{CatConfig, FormatOptions, Transformer};
//!
//! fn main() -> Result<(), catrs::CatError> {
//!     let opts = FormatOptions::new().with_number_nonblank(true);
//!     let mut cat = Transformer::new(CatConfig::default().with_options(opts));
//!
//!     let mut out = Vec::new();
//!     for input in [&b"one\n\n"[..], &b"two\n"[..]] {
//!         cat.transform(&mut &input[..], &mut out)?;
//!     }
//!     cat.finish(&mut out)?;
//!
//!     assert_eq!(out, b"     1\tone\n\n     2\ttwo\n");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod copy;
mod engine;
mod error;
mod label;
mod source;
mod state;

mod buffer; // internal chunk buffers

//
// Public surface (intentionally tiny)
//

pub use config::{CatConfig, DEFAULT_INPUT_SIZE, DEFAULT_OUTPUT_SIZE, FormatOptions};
pub use copy::copy_plain;
pub use engine::{Notation, Transformer, notation};
pub use error::CatError;
pub use label::{LineNumber, MAX_DIGITS, MIN_WIDTH, OVERFLOW_MARKER};
pub use source::ByteSource;
pub use state::{BlankRun, TransformState};
