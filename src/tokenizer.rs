//! Splits raw byte chunks into column fragments.

use std::borrow::Cow;

/// What ended a column fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The delimiter byte; more columns follow in this row.
    Delimiter,
    /// A `\n`; the row is complete.
    LineBreak,
    /// The chunk ran out before any boundary byte.
    Unterminated,
}

/// One column fragment scanned from the front of a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Bytes before the boundary. Carriage returns are stripped for line breaks.
    pub text: Cow<'a, [u8]>,
    /// Bytes of input consumed, boundary included.
    pub consumed: usize,
    pub boundary: Boundary,
}

/// Scan `chunk` for the first delimiter or newline byte.
pub fn tokenize(chunk: &[u8], delimiter: u8) -> Token<'_> {
    match chunk.iter().position(|&b| b == delimiter || b == b'\n') {
        Some(offset) if chunk[offset] == delimiter => Token {
            text: Cow::Borrowed(&chunk[..offset]),
            consumed: offset + 1,
            boundary: Boundary::Delimiter,
        },
        Some(offset) => Token {
            text: strip_carriage_returns(&chunk[..offset]),
            consumed: offset + 1,
            boundary: Boundary::LineBreak,
        },
        None => Token {
            text: Cow::Borrowed(chunk),
            consumed: chunk.len(),
            boundary: Boundary::Unterminated,
        },
    }
}

pub(crate) fn strip_carriage_returns(bytes: &[u8]) -> Cow<'_, [u8]> {
    if bytes.contains(&b'\r') {
        Cow::Owned(bytes.iter().copied().filter(|&b| b != b'\r').collect())
    } else {
        Cow::Borrowed(bytes)
    }
}
