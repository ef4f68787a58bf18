//! Fatal parse errors

use super::ply::HeaderState;

/// Error that makes a whole file unusable.
///
/// Recoverable problems (a bad line, a bad face) go to
/// [`Diagnostics`](super::Diagnostics) instead.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// File could not be read
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),

    /// No `end_header` marker, so the payload cannot be located
    #[error("couldn't find 'end_header'")]
    MissingEndHeader,

    /// Header line did not match what the header state machine expected
    #[error("line {line}: {} (expected '{}')", .state.error_message(), .state.expected())]
    Header { line: usize, state: HeaderState },

    /// `vertex_count * 12` does not fit in memory
    #[error("vertex count too large ({0})")]
    VertexCountTooLarge(u64),

    #[error("expected {expected} bytes of vertex data but got {actual}")]
    TruncatedVertexData { expected: u64, actual: usize },

    #[error("expected {expected} faces but got {got}")]
    TruncatedFaces { expected: u64, got: u64 },

    #[error("expected index in face {face} but reached end of file")]
    TruncatedIndex { face: u64 },

    #[error("invalid index ({index}) in face {face}")]
    InvalidIndex { face: u64, index: u32 },
}
