//! Error types for drag payload decoding.

use thiserror::Error;

/// Errors raised while decoding a drag payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The buffer ends before a declared field is complete.
    #[error(
        "truncated payload: {field} needs {needed} bytes at offset {offset}, {available} available"
    )]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The buffer is structurally invalid (negative counts, bad text, extra bytes).
    #[error("malformed drag payload: {message}")]
    Malformed { message: String },
}

/// Result type alias for payload operations.
pub type Result<T> = std::result::Result<T, PayloadError>;

impl PayloadError {
    /// Create a Malformed error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create a Truncated error.
    pub fn truncated(field: &'static str, offset: usize, needed: usize, available: usize) -> Self {
        Self::Truncated {
            field,
            offset,
            needed,
            available,
        }
    }

    /// Returns true for the truncation variant.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PayloadError::malformed("negative sub-button count: -1");
        insta::assert_snapshot!(
            err.to_string(),
            @"malformed drag payload: negative sub-button count: -1"
        );

        let err = PayloadError::truncated("sub-button states", 20, 8, 4);
        insta::assert_snapshot!(
            err.to_string(),
            @"truncated payload: sub-button states needs 8 bytes at offset 20, 4 available"
        );
        assert!(err.is_truncated());
    }
}
