//! Errors raised while assembling a [`Frame`](crate::frame::Frame).
//!
//! Frame construction is the only place these can occur; once a frame
//! exists, its columns are guaranteed to have equal length and unique names.

/// Result alias for frame construction.
pub type FrameResult<T> = Result<T, FrameError>;

/// Structural problems detected when building a frame from columns.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// A column's length differs from the first column's length.
    LengthMismatch { column: String, expected: usize, actual: usize },

    /// The same column name appears more than once.
    DuplicateName { name: String },
}

impl std::error::Error for FrameError {}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::LengthMismatch { column, expected, actual } => {
                write!(f, "Column `{column}` has {actual} rows, whereas the frame has {expected} rows")
            }
            FrameError::DuplicateName { name } => {
                write!(f, "Column name `{name}` is used more than once")
            }
        }
    }
}
