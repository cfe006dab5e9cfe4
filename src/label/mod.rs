//! Line-number labels.
//!
//! - [`LineNumber`] - Right-justified decimal counter printed before each numbered line

mod line_number;

pub use line_number::{LineNumber, MAX_DIGITS, MIN_WIDTH, OVERFLOW_MARKER};
