use thiserror::Error;

/// Reasons an edit is rejected.
///
/// A rejected edit leaves the buffer exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Inserting would make the line reach its capacity.
    #[error("line is full (capacity {capacity})")]
    LineFull { capacity: usize },
    /// Splitting would exceed the maximum number of lines.
    #[error("buffer is full ({max_lines} lines)")]
    TooManyLines { max_lines: usize },
    /// Joining two lines would make the result reach the line capacity.
    #[error("joined line would exceed capacity {capacity}")]
    MergeOverflow { capacity: usize },
    /// Inserted text must be printable ASCII without line breaks.
    #[error("only printable ASCII text can be inserted")]
    UnsupportedText,
    #[error("invalid limits: {0}")]
    InvalidLimits(&'static str),
}
