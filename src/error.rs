//! Errors reported while decoding a malformed container.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormatError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A field extends beyond the end of the buffer.
    #[error("truncated {field}: need {needed} bytes, {available} available")]
    Truncated {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    /// A declared width is zero or does not fit in a 64-bit word.
    #[error("invalid {field} width {width}")]
    InvalidWidth { field: &'static str, width: usize },

    /// A pointer refers to a dictionary entry that was not created yet.
    #[error("index {index} refers past the dictionary of {size} entries")]
    InvalidIndex { index: u64, size: usize },

    /// The entries table tries to create an edge twice.
    #[error("entry {parent}:{symbol:#04x} already exists")]
    DuplicateEntry { parent: usize, symbol: u8 },

    /// The token stream does not divide into whole pointers.
    #[error("{remaining} trailing bytes do not form a pointer")]
    TrailingBytes { remaining: usize },

    /// The symbol table is not sorted in strictly ascending order.
    #[error("symbol {symbol:#04x} is out of order")]
    UnorderedSymbols { symbol: u8 },

    /// The symbol table lists a symbol that never occurs.
    #[error("symbol {symbol:#04x} has zero frequency")]
    ZeroFrequency { symbol: u8 },

    /// The element count disagrees with the symbol table.
    #[error("declared {declared} elements, which is not a positive multiple of {sum}")]
    CountMismatch { declared: u64, sum: u64 },

    /// The payload is too short to hold the declared number of elements.
    #[error("declared {declared} elements, but the payload holds at most {limit}")]
    CountOverflow { declared: u64, limit: u64 },
}
