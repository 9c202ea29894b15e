//! Error types for JSON validation and the graph codec

use cmap_model::ModelError;

/// Errors while validating, decoding or encoding a concept map document
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Document is not valid JSON or lacks a required section
    #[error("{0}")]
    Malformed(String),

    /// A required field is absent or is not a string
    #[error("Required field '{field}' is missing or not a string")]
    MissingField {
        /// Wire name of the field
        field: &'static str,
    },

    /// Entity or aggregate invariant violated while assembling the graph
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Graph could not be written as JSON
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl CodecError {
    /// Create malformed-document error
    #[inline]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Whether the document itself is structurally at fault
    ///
    /// True for syntax errors and missing fields, false for model
    /// violations and serialization failures.
    #[inline]
    #[must_use]
    pub fn is_malformed_document(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::MissingField { .. })
    }

    /// The model error behind this failure, if any
    #[inline]
    #[must_use]
    pub fn as_model(&self) -> Option<&ModelError> {
        match self {
            Self::Model(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
