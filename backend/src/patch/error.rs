//! Patch failure types.

use crate::validation::ValidationReport;

/// Why a single patch operation could not be applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperationError {
    #[error("invalid pointer '{pointer}': {reason}")]
    InvalidPointer { pointer: String, reason: String },

    #[error("path '{path}' has no field '{field}'")]
    UnknownField { path: String, field: String },

    #[error("path '{path}' has invalid array index '{token}'")]
    InvalidIndex { path: String, token: String },

    #[error("path '{path}' does not exist")]
    PathNotFound { path: String },

    #[error("index {index} is out of bounds at '{path}' (length {len})")]
    IndexOutOfBounds { path: String, index: usize, len: usize },

    #[error("value at '{path}' must be {expected}")]
    TypeMismatch { path: String, expected: &'static str },

    #[error("field at '{path}' is required and cannot be removed")]
    RequiredField { path: String },

    #[error("the document root cannot be targeted")]
    RootTarget,

    #[error("cannot move '{from}' into its own child '{path}'")]
    MoveIntoChild { from: String, path: String },

    #[error("test failed at '{path}': expected {expected}, found {actual}")]
    TestFailed {
        path: String,
        expected: serde_json::Value,
        actual: serde_json::Value,
    },
}

/// Error type for a whole patch document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatchError {
    /// The body is not a list of operation objects.
    #[error("invalid patch document: {0}")]
    InvalidDocument(String),

    /// An entry of the list is not a well-formed operation.
    #[error("operation {index} is malformed: {message}")]
    MalformedOperation { index: usize, message: String },

    /// A well-formed operation failed against the planet.
    #[error("operation {index} ({op}) failed: {source}")]
    OperationFailed {
        index: usize,
        op: &'static str,
        #[source]
        source: OperationError,
    },

    /// Every operation applied but the result is no longer a valid planet.
    #[error("patched planet is invalid: {0}")]
    InvalidResult(ValidationReport),
}
