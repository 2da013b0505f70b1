//! Line terminator helpers.
//!
//! Unlike a document buffer, a selection is never normalized: every line keeps the exact
//! terminator it was read with, so a block mixing `"\r\n"`, `'\n'` and a lone `'\r'` is
//! written back with the same mix.

/// The newline sequence that ends a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineTerminator {
    /// No terminator. Only the final line of a block may be unterminated.
    #[default]
    None,
    /// Unix-style LF (`'\n'`).
    Lf,
    /// Classic Mac-style CR (`'\r'`).
    Cr,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineTerminator {
    /// The terminator text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::Crlf => "\r\n",
        }
    }

    /// Length of the terminator in bytes.
    pub fn byte_len(self) -> usize {
        self.as_str().len()
    }

    /// Returns `true` for [`LineTerminator::None`].
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    /// Detect the terminator at the start of `rest`, if any.
    ///
    /// `"\r\n"` is always taken as one CRLF, never as CR followed by an empty LF line.
    pub fn detect_at(rest: &[u8]) -> Self {
        match rest {
            [b'\r', b'\n', ..] => Self::Crlf,
            [b'\r', ..] => Self::Cr,
            [b'\n', ..] => Self::Lf,
            _ => Self::None,
        }
    }
}
