//! Error types for pagesim.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
///
/// The replacement algorithms themselves are total over well-formed input,
/// so every variant here is an input validation failure. Validation always
/// runs before the first step is simulated; a run never fails halfway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The reference sequence has no elements.
    #[error("Reference string must be a non-empty array")]
    EmptyReferences,

    /// Frame count outside `MIN_FRAMES..=MAX_FRAMES`, or not an integer.
    ///
    /// See [`crate::common::config`] for the bounds.
    #[error("Number of frames must be between 1 and 10 (got {got})")]
    InvalidFrameCount { got: String },

    /// Policy name is not one of `FIFO`, `LRU`, `Optimal`.
    #[error("Algorithm must be one of: FIFO, LRU, Optimal (got {0:?})")]
    UnknownPolicy(String),

    /// A reference is zero, negative, or not an integer.
    #[error("Reference string must contain only positive integers (position {index}: {value})")]
    InvalidReference { index: usize, value: String },

    /// The request body could not be decoded.
    #[error("Invalid JSON in request body: {0}")]
    InvalidJson(String),
}

impl Error {
    /// The wire-level code reported to callers for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::EmptyReferences => ErrorCode::InvalidRefs,
            Error::InvalidFrameCount { .. } => ErrorCode::InvalidFrames,
            Error::UnknownPolicy(_) => ErrorCode::InvalidAlgorithm,
            Error::InvalidReference { .. } => ErrorCode::InvalidRefValues,
            Error::InvalidJson(_) => ErrorCode::InvalidJson,
        }
    }
}

/// Structured error codes, serialized as `INVALID_REFS` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidRefs,
    InvalidFrames,
    InvalidAlgorithm,
    InvalidRefValues,
    InvalidJson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyReferences;
        assert_eq!(format!("{}", err), "Reference string must be a non-empty array");

        let err = Error::InvalidFrameCount { got: "11".into() };
        assert_eq!(
            format!("{}", err),
            "Number of frames must be between 1 and 10 (got 11)"
        );

        let err = Error::InvalidReference {
            index: 2,
            value: "-4".into(),
        };
        assert!(format!("{}", err).contains("position 2: -4"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::EmptyReferences.code(), ErrorCode::InvalidRefs);
        assert_eq!(
            Error::InvalidFrameCount { got: "0".into() }.code(),
            ErrorCode::InvalidFrames
        );
        assert_eq!(
            Error::UnknownPolicy("MRU".into()).code(),
            ErrorCode::InvalidAlgorithm
        );
        assert_eq!(
            Error::InvalidReference {
                index: 0,
                value: "0".into()
            }
            .code(),
            ErrorCode::InvalidRefValues
        );
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::InvalidRefValues).unwrap();
        assert_eq!(json, "\"INVALID_REF_VALUES\"");

        let json = serde_json::to_string(&ErrorCode::InvalidAlgorithm).unwrap();
        assert_eq!(json, "\"INVALID_ALGORITHM\"");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Err(Error::EmptyReferences)
        }

        assert!(might_fail().is_err());
    }
}
