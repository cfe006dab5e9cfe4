//! Configuration for transformation behavior.
//!
//! This module provides types to configure how a stream is rewritten:
//!
//! - [`FormatOptions`] - Which textual transformations are active
//! - [`CatConfig`] - I/O chunk sizes plus the formatting options
//!
//! # Example
//!
//! ```
//! use catrs::{CatConfig, FormatOptions};
//!
//! // Custom I/O sizes
//! let config = CatConfig::new(4096, 4096)?;
//!
//! // Number lines and show line ends
//! let config = CatConfig::default()
//!     .with_options(FormatOptions::new().with_number(true).with_show_ends(true));
//!
//! # Ok::<(), catrs::CatError>(())
//! ```

use crate::error::CatError;

/// Default size of a single read from the input (128 KiB).
pub const DEFAULT_INPUT_SIZE: usize = 128 * 1024;

/// Default size of a single write to the output (128 KiB).
pub const DEFAULT_OUTPUT_SIZE: usize = 128 * 1024;

/// The set of active textual transformations.
///
/// All flags are independent. `number_nonblank` implies numbering and
/// overrides `number` for blank lines, but both may be set.
///
/// # Example
///
/// ```
/// use catrs::FormatOptions;
///
/// let opts = FormatOptions::show_all();
/// assert!(opts.show_nonprinting && opts.show_ends && opts.show_tabs);
/// assert!(FormatOptions::new().is_plain());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FormatOptions {
    /// Use `^` and `M-` notation, except for LF and TAB.
    pub show_nonprinting: bool,

    /// Display TAB characters as `^I`.
    pub show_tabs: bool,

    /// Number all output lines.
    pub number: bool,

    /// Number non-empty output lines only.
    pub number_nonblank: bool,

    /// Display `$` at the end of each line.
    pub show_ends: bool,

    /// Suppress repeated empty output lines.
    pub squeeze_blank: bool,
}

impl FormatOptions {
    /// Creates options with every transformation disabled.
    pub const fn new() -> Self {
        Self {
            show_nonprinting: false,
            show_tabs: false,
            number: false,
            number_nonblank: false,
            show_ends: false,
            squeeze_blank: false,
        }
    }

    /// Equivalent to `-vET`.
    pub const fn show_all() -> Self {
        Self::new()
            .with_show_nonprinting(true)
            .with_show_ends(true)
            .with_show_tabs(true)
    }

    /// Equivalent to `-vE`.
    pub const fn ends_nonprinting() -> Self {
        Self::new().with_show_nonprinting(true).with_show_ends(true)
    }

    /// Equivalent to `-vT`.
    pub const fn tabs_nonprinting() -> Self {
        Self::new().with_show_nonprinting(true).with_show_tabs(true)
    }

    /// Sets `show_nonprinting`.
    pub const fn with_show_nonprinting(mut self, on: bool) -> Self {
        self.show_nonprinting = on;
        self
    }

    /// Sets `show_tabs`.
    pub const fn with_show_tabs(mut self, on: bool) -> Self {
        self.show_tabs = on;
        self
    }

    /// Sets `number`.
    pub const fn with_number(mut self, on: bool) -> Self {
        self.number = on;
        self
    }

    /// Sets `number_nonblank`.
    pub const fn with_number_nonblank(mut self, on: bool) -> Self {
        self.number_nonblank = on;
        self
    }

    /// Sets `show_ends`.
    pub const fn with_show_ends(mut self, on: bool) -> Self {
        self.show_ends = on;
        self
    }

    /// Sets `squeeze_blank`.
    pub const fn with_squeeze_blank(mut self, on: bool) -> Self {
        self.squeeze_blank = on;
        self
    }

    /// Returns `true` if any line receives a number.
    pub const fn numbers_lines(&self) -> bool {
        self.number || self.number_nonblank
    }

    /// Returns `true` if no option changes a single byte of the input.
    ///
    /// Plain streams can bypass the engine and use
    /// [`copy_plain`](crate::copy_plain).
    pub const fn is_plain(&self) -> bool {
        !(self.numbers_lines()
            || self.show_ends
            || self.squeeze_blank
            || self.show_nonprinting
            || self.show_tabs)
    }
}

/// Configuration for a transformation session.
///
/// `input_size` bounds every read from the source and `output_size` is the
/// size of every full write to the sink. Both may be as small as one byte;
/// the output buffer always reserves enough slack for one fully expanded
/// unit beyond `output_size`.
///
/// # Example
///
/// ```
/// use catrs::CatConfig;
///
/// let config = CatConfig::new(1, 1)?;
/// assert_eq!(config.input_size(), 1);
///
/// assert!(CatConfig::new(0, 4096).is_err());
/// # Ok::<(), catrs::CatError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatConfig {
    input_size: usize,
    output_size: usize,
    options: FormatOptions,
}

impl CatConfig {
    /// Creates a new configuration with the given I/O sizes and no options.
    ///
    /// # Errors
    ///
    /// Returns [`CatError::InvalidConfig`] if either size is zero.
    pub fn new(input_size: usize, output_size: usize) -> Result<Self, CatError> {
        if input_size == 0 {
            return Err(CatError::InvalidConfig {
                message: "input_size must be non-zero",
            });
        }

        if output_size == 0 {
            return Err(CatError::InvalidConfig {
                message: "output_size must be non-zero",
            });
        }

        Ok(Self {
            input_size,
            output_size,
            options: FormatOptions::new(),
        })
    }

    /// Sets the input read size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`CatConfig::validate`] to check it.
    pub fn with_input_size(mut self, size: usize) -> Self {
        self.input_size = size;
        self
    }

    /// Sets the output write size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`CatConfig::validate`] to check it.
    pub fn with_output_size(mut self, size: usize) -> Self {
        self.output_size = size;
        self
    }

    /// Sets the formatting options.
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the input read size.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Returns the output write size.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Returns the formatting options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use catrs::CatConfig;
    ///
    /// let config = CatConfig::default().with_output_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CatError> {
        Self::new(self.input_size, self.output_size).map(|_| ())
    }
}

impl Default for CatConfig {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            output_size: DEFAULT_OUTPUT_SIZE,
            options: FormatOptions::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatConfig::default();
        assert_eq!(config.input_size(), DEFAULT_INPUT_SIZE);
        assert_eq!(config.output_size(), DEFAULT_OUTPUT_SIZE);
        assert!(config.options().is_plain());
    }

    #[test]
    fn test_builder_pattern() {
        let config = CatConfig::default()
            .with_input_size(7)
            .with_output_size(3)
            .with_options(FormatOptions::new().with_squeeze_blank(true));

        assert_eq!(config.input_size(), 7);
        assert_eq!(config.output_size(), 3);
        assert!(config.options().squeeze_blank);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_zero_size() {
        assert!(CatConfig::new(0, 16).is_err());
        assert!(CatConfig::new(16, 0).is_err());
        assert!(CatConfig::default().with_input_size(0).validate().is_err());
    }

    #[test]
    fn test_presets() {
        let all = FormatOptions::show_all();
        assert!(all.show_nonprinting && all.show_ends && all.show_tabs);
        assert!(!all.numbers_lines() && !all.squeeze_blank);

        let e = FormatOptions::ends_nonprinting();
        assert!(e.show_nonprinting && e.show_ends && !e.show_tabs);

        let t = FormatOptions::tabs_nonprinting();
        assert!(t.show_nonprinting && t.show_tabs && !t.show_ends);
    }

    #[test]
    fn test_number_nonblank_implies_numbering() {
        let opts = FormatOptions::new().with_number_nonblank(true);
        assert!(opts.numbers_lines());
        assert!(!opts.is_plain());
    }

    #[test]
    fn test_each_option_breaks_plain() {
        let base = FormatOptions::new();
        assert!(base.is_plain());
        for opts in [
            base.with_show_nonprinting(true),
            base.with_show_tabs(true),
            base.with_number(true),
            base.with_number_nonblank(true),
            base.with_show_ends(true),
            base.with_squeeze_blank(true),
        ] {
            assert!(!opts.is_plain(), "{opts:?} should not be plain");
        }
    }
}
