//! Transformation state carried across chunks and across inputs.
//!
//! - [`BlankRun`] - Where the stream is relative to line boundaries
//! - [`TransformState`] - Blank-run position plus the pending-CR flag

/// Position of the stream relative to runs of line terminators.
///
/// The run length is capped at two so long runs of empty lines cannot grow
/// the state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlankRun {
    /// Inside a line; the last byte seen was not a terminator.
    MidLine,

    /// At the start of a line that followed non-blank content.
    #[default]
    LineStart,

    /// Exactly one empty line seen.
    Single,

    /// Two or more consecutive empty lines seen.
    Repeated,
}

impl BlankRun {
    /// Returns the state after consuming a genuine line terminator.
    pub fn after_newline(self) -> Self {
        match self {
            BlankRun::MidLine => BlankRun::LineStart,
            BlankRun::LineStart => BlankRun::Single,
            BlankRun::Single | BlankRun::Repeated => BlankRun::Repeated,
        }
    }

    /// Returns `true` if the stream sits on a line boundary.
    pub fn at_line_start(self) -> bool {
        self != BlankRun::MidLine
    }

    /// Returns `true` if the terminator just consumed ended an empty line.
    pub fn is_blank_line(self) -> bool {
        matches!(self, BlankRun::Single | BlankRun::Repeated)
    }

    /// Returns the run as a counter: `-1` mid-line, otherwise the number of
    /// empty lines seen (capped at `2`).
    pub fn count(self) -> i8 {
        match self {
            BlankRun::MidLine => -1,
            BlankRun::LineStart => 0,
            BlankRun::Single => 1,
            BlankRun::Repeated => 2,
        }
    }
}

/// State that must survive between reads and between successive inputs of
/// one concatenation session.
///
/// # Example
///
/// ```
/// use catrs::{BlankRun, TransformState};
///
/// let state = TransformState::default();
/// assert_eq!(state.blank_run, BlankRun::LineStart);
/// assert!(!state.pending_cr);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TransformState {
    /// Position relative to the current run of line terminators.
    pub blank_run: BlankRun,

    /// A CR ended the previous read and its follower was not yet known.
    pub pending_cr: bool,
}

impl TransformState {
    /// Creates the state of a fresh session.
    pub fn new() -> Self {
        Self::default()
    }
}
