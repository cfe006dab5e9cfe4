//! Detection of an input that is also the output file.
//!
//! Reading a regular file that standard output is appending to, from an
//! offset short of its end, would never reach end of file, so such inputs
//! are refused. Standard input is checked the same way as named files.

use std::fs::File;

/// Identity of standard output when it is a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputIdentity {
    #[cfg(unix)]
    dev: u64,
    #[cfg(unix)]
    ino: u64,
}

impl OutputIdentity {
    /// Captures standard output's identity, if it is a regular file.
    #[cfg(unix)]
    pub fn of_stdout() -> Option<Self> {
        use std::os::fd::AsFd;
        use std::os::unix::fs::MetadataExt;

        let fd = std::io::stdout().as_fd().try_clone_to_owned().ok()?;
        let meta = File::from(fd).metadata().ok()?;
        meta.is_file().then(|| Self {
            dev: meta.dev(),
            ino: meta.ino(),
        })
    }

    #[cfg(not(unix))]
    pub fn of_stdout() -> Option<Self> {
        None
    }

    /// Returns `true` if `input` is this same file and its read offset is
    /// short of the end.
    #[cfg(unix)]
    pub fn is_same_file(&self, input: &File) -> bool {
        use std::io::Seek;
        use std::os::unix::fs::MetadataExt;

        let meta = match input.metadata() {
            Ok(meta) => meta,
            Err(e) => {
                log::debug!("cannot stat input: {e}");
                return false;
            }
        };

        if !meta.is_file() || meta.dev() != self.dev || meta.ino() != self.ino {
            return false;
        }

        // The offset is shared with every descriptor on the same open file.
        let mut handle = input;
        match handle.stream_position() {
            Ok(offset) => offset < meta.len(),
            Err(e) => {
                log::debug!("cannot read input offset: {e}");
                false
            }
        }
    }

    #[cfg(not(unix))]
    pub fn is_same_file(&self, _input: &File) -> bool {
        false
    }

    /// Returns `true` if standard input is this same file.
    #[cfg(unix)]
    pub fn is_stdin(&self) -> bool {
        use std::os::fd::AsFd;

        match std::io::stdin().as_fd().try_clone_to_owned() {
            Ok(fd) => self.is_same_file(&File::from(fd)),
            Err(e) => {
                log::debug!("cannot duplicate stdin: {e}");
                false
            }
        }
    }

    #[cfg(not(unix))]
    pub fn is_stdin(&self) -> bool {
        false
    }
}
