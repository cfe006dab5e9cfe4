//! Error types for catrs.

use std::io;

use thiserror::Error;

/// Errors that can occur while transforming or copying a stream.
///
/// A [`CatError::Read`] affects only the input being processed; the caller
/// may continue with the next input. A [`CatError::Write`] means output may
/// have been lost and the whole session must stop.
#[derive(Debug, Error)]
pub enum CatError {
    /// Reading from the input failed. Output produced so far was flushed.
    #[error("read error: {0}")]
    Read(#[source] io::Error),

    /// Writing to the output failed or the sink refused a full write.
    #[error("write error: {0}")]
    Write(#[source] io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl CatError {
    /// Returns `true` if the error must terminate the whole session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CatError::Write(_))
    }

    /// Returns the underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            CatError::Read(e) | CatError::Write(e) => Some(e),
            CatError::InvalidConfig { .. } => None,
        }
    }
}
