//! Error types for the button model.

use thiserror::Error;
use vpl_dnd::PayloadError;

/// Errors raised by click, mode and drop operations.
///
/// Every variant is recoverable: the operation that produced it leaves the
/// model as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VplError {
    /// A click state was set outside `[0, num_states)`.
    #[error("state {value} out of range for a {num_states}-state button")]
    InvalidState { value: u32, num_states: u8 },

    /// A sub-button index past the end of the button.
    #[error("sub-button index {index} out of range ({len} sub-buttons)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The kind registry has no entry for this name.
    #[error("unknown button kind: {name:?}")]
    UnknownButtonKind { name: String },

    /// A drag payload that cannot be turned into a button.
    #[error("malformed drag payload: {message}")]
    MalformedDragPayload { message: String },

    /// A drag payload shorter than its declared contents.
    #[error("truncated drag payload: {field} needs {needed} bytes, {available} available")]
    TruncatedPayload {
        field: &'static str,
        needed: usize,
        available: usize,
    },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, VplError>;

impl VplError {
    /// Create an UnknownButtonKind error.
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::UnknownButtonKind { name: name.into() }
    }

    /// Create a MalformedDragPayload error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDragPayload {
            message: message.into(),
        }
    }
}

impl From<PayloadError> for VplError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Truncated {
                field,
                needed,
                available,
                ..
            } => Self::TruncatedPayload {
                field,
                needed,
                available,
            },
            PayloadError::Malformed { message } => Self::MalformedDragPayload { message },
        }
    }
}
