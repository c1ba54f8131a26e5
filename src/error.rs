use std::io;

use thiserror::Error;

/// Errors surfaced by building, saving, loading, or decoding a code tree.
///
/// None of these are transient: every variant means the input handed to the
/// operation was malformed, and the operation in progress is abandoned at
/// the point of detection.
#[derive(Error, Debug)]
pub enum CodeError {
    /// No symbol in the frequency table has a positive count, so there is
    /// nothing to build a code from.
    #[error("no symbol has a positive frequency")]
    EmptyAlphabet,

    /// The code-table text did not follow the two-lines-per-leaf format:
    /// an odd number of lines, an unparseable symbol line, a path character
    /// other than '0'/'1', or a table whose paths do not assemble into a
    /// complete tree.
    #[error("malformed code table: {0}")]
    MalformedTable(String),

    /// The code table is not prefix-free: the given path collides with, or
    /// is a strict prefix or extension of, a previously loaded entry.
    #[error("code table is not prefix-free at symbol {symbol}, path {path:?}")]
    AmbiguousCode { symbol: u8, path: String },

    /// The bit source ran out in the middle of a code word.
    #[error("bit stream ended in the middle of a code word")]
    TruncatedStream,

    /// The byte being encoded has no leaf in the tree.
    #[error("symbol {0} has no code word in this tree")]
    UnknownSymbol(u8),

    #[error(transparent)]
    Io(#[from] io::Error),
}
