//! Bounded I/O buffers used by the transformation engine.
//!
//! This module provides the input and output chunk buffers. It is an
//! implementation detail and not part of the public API.

mod input;
mod output;

pub(crate) use input::InputChunk;
pub(crate) use output::OutputChunk;
