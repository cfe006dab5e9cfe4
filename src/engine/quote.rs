//! Caret and meta notation for non-printing bytes (`-v`).
//!
//! | byte        | rendering              |
//! |-------------|------------------------|
//! | `0..=31`    | `^@` .. `^_`           |
//! | `32..=126`  | itself                 |
//! | `127`       | `^?`                   |
//! | `128..=255` | `M-` + rendering of `b - 128` |
//!
//! TAB and LF follow the control rule here; the engine decides whether to
//! pass them through.

/// The rendering of a single byte: one to four ASCII bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notation {
    bytes: [u8; 4],
    len: u8,
}

impl Notation {
    const fn empty() -> Self {
        Self {
            bytes: [0; 4],
            len: 0,
        }
    }

    const fn with(mut self, byte: u8) -> Self {
        self.bytes[self.len as usize] = byte;
        self.len += 1;
        self
    }

    /// Returns the rendered bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

const fn render(byte: u8) -> Notation {
    let mut n = Notation::empty();
    let low = if byte >= 128 {
        n = n.with(b'M').with(b'-');
        byte - 128
    } else {
        byte
    };

    if low < 32 {
        n.with(b'^').with(low + 64)
    } else if low < 127 {
        n.with(low)
    } else {
        n.with(b'^').with(b'?')
    }
}

const fn build_table() -> [Notation; 256] {
    let mut table = [Notation::empty(); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = render(i as u8);
        i += 1;
    }
    table
}

static TABLE: [Notation; 256] = build_table();

/// Returns the `-v` rendering of `byte`.
///
/// # Example
///
/// ```
/// use catrs::notation;
///
/// assert_eq!(notation(b'a').as_bytes(), b"a");
/// assert_eq!(notation(0x01).as_bytes(), b"^A");
/// assert_eq!(notation(0x7f).as_bytes(), b"^?");
/// assert_eq!(notation(0xe9).as_bytes(), b"M-i");
/// assert_eq!(notation(0xff).as_bytes(), b"M-^?");
/// ```
#[inline]
pub fn notation(byte: u8) -> Notation {
    TABLE[byte as usize]
}
