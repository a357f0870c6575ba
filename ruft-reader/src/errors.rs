use thiserror::Error;

use crate::actor::DispatchError;

/// Fatal conditions that abort an in-progress parse.
///
/// Every variant carries the byte offset (or remaining depth) needed to
/// diagnose the failure. None of them is recoverable: a reader that returned
/// an error must be discarded.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("group nesting exceeds {max} levels at byte {offset}")]
    StackOverflow { offset: usize, max: usize },

    #[error("closing brace without a matching group at byte {offset}")]
    StackUnderflow { offset: usize },

    #[error("end of stream with {depth} unclosed groups")]
    UnmatchedBrace { depth: usize },

    #[error("end of stream inside a control word at byte {offset}")]
    UnexpectedEof { offset: usize },

    #[error("byte {byte:#04x} is not a hexadecimal digit at byte {offset}")]
    InvalidHex { offset: usize, byte: u8 },

    #[error("control word exceeds {max} characters at byte {offset}")]
    KeywordTooLong { offset: usize, max: usize },

    #[error("numeric parameter exceeds {max} digits at byte {offset}")]
    ParameterTooLong { offset: usize, max: usize },

    #[error("reader state corrupted at byte {offset}")]
    UnreachableState { offset: usize },

    #[error("control word rejected at byte {offset}: {source}")]
    Dispatch {
        offset: usize,
        #[source]
        source: DispatchError,
    },
}
