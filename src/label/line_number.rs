//! The line-number label printed by `-n` and `-b`.
//!
//! The label is a fixed byte field holding right-justified ASCII digits
//! followed by a TAB. Printing never formats anything: the printable part is
//! always a ready-made slice of the field.
//!
//! ```text
//!  index:  0 ...            12 13 14 15 16 17 18
//!  field: ' ' ... ' '  ' '  ' ' ' ' ' ' ' ' '7' \t
//!                       ^print_start       ^digits_start
//! ```

/// Maximum number of digit columns the field can hold.
pub const MAX_DIGITS: usize = 18;

/// Minimum printed width of the number, padded with spaces on the left.
pub const MIN_WIDTH: usize = 6;

/// Byte written into the leftmost column once the counter outgrows the field.
pub const OVERFLOW_MARKER: u8 = b'>';

const FIELD_LEN: usize = MAX_DIGITS + 1;
const LAST_DIGIT: usize = MAX_DIGITS - 1;
const TAB: usize = MAX_DIGITS;
const DEFAULT_PRINT_START: usize = LAST_DIGIT + 1 - MIN_WIDTH;

/// A growable decimal line counter rendered as a printable label.
///
/// The counter starts at zero and is advanced before each numbered line, so
/// the first label printed is `     1\t`. Digits grow to the left one column at
/// a time; padding shrinks in step once the number is wider than
/// [`MIN_WIDTH`].
///
/// When a carry runs out of columns the leftmost column becomes
/// [`OVERFLOW_MARKER`] for good and the remaining `MAX_DIGITS - 1` digits
/// keep wrapping. The printed value is no longer the true line number from
/// then on.
///
/// # Example
///
/// ```
/// use catrs::LineNumber;
///
/// let mut label = LineNumber::new();
/// label.advance();
/// assert_eq!(label.as_bytes(), b"     1\t");
///
/// let mut label = LineNumber::starting_at(999_999).unwrap();
/// label.advance();
/// assert_eq!(label.as_bytes(), b"1000000\t");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumber {
    field: [u8; FIELD_LEN],
    digits_start: usize,
    print_start: usize,
    overflowed: bool,
}

impl LineNumber {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        let mut field = [b' '; FIELD_LEN];
        field[LAST_DIGIT] = b'0';
        field[TAB] = b'\t';

        Self {
            field,
            digits_start: LAST_DIGIT,
            print_start: DEFAULT_PRINT_START,
            overflowed: false,
        }
    }

    /// Creates a counter holding `value`.
    ///
    /// Returns `None` if `value` needs more than [`MAX_DIGITS`] digits.
    ///
    /// # Example
    ///
    /// ```
    /// use catrs::LineNumber;
    ///
    /// let label = LineNumber::starting_at(42).unwrap();
    /// assert_eq!(label.digits(), b"42");
    /// assert!(LineNumber::starting_at(u64::MAX).is_none());
    /// ```
    pub fn starting_at(value: u64) -> Option<Self> {
        let mut label = Self::new();
        let mut pos = LAST_DIGIT;
        let mut rest = value;

        loop {
            label.field[pos] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
            if pos == 0 {
                return None;
            }
            pos -= 1;
        }

        label.digits_start = pos;
        label.print_start = pos.min(DEFAULT_PRINT_START);
        Some(label)
    }

    /// Increments the counter by one in place.
    ///
    /// Only the digits touched by the carry change. A carry out of the
    /// leftmost digit widens the number by one column, or sets the overflow
    /// marker when no column is left.
    pub fn advance(&mut self) {
        let floor = self.digits_start + usize::from(self.overflowed);
        let mut pos = LAST_DIGIT;

        loop {
            if self.field[pos] < b'9' {
                self.field[pos] += 1;
                return;
            }
            self.field[pos] = b'0';
            if pos == floor {
                break;
            }
            pos -= 1;
        }

        if self.overflowed {
            return;
        }

        if self.digits_start > 0 {
            self.digits_start -= 1;
            self.field[self.digits_start] = b'1';
        } else {
            self.field[0] = OVERFLOW_MARKER;
            self.overflowed = true;
        }

        if self.digits_start < self.print_start {
            self.print_start -= 1;
        }
    }

    /// Returns the printable label: padding, digits and the trailing TAB.
    pub fn as_bytes(&self) -> &[u8] {
        &self.field[self.print_start..]
    }

    /// Returns the digit columns, without padding, marker or TAB.
    pub fn digits(&self) -> &[u8] {
        let start = self.digits_start + usize::from(self.overflowed);
        &self.field[start..TAB]
    }

    /// Returns `true` once the counter has outgrown the field.
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }
}

impl Default for LineNumber {
    fn default() -> Self {
        Self::new()
    }
}
