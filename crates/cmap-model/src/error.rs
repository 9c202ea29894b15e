//! Error types for the concept graph model
//!
//! Covers:
//! - Entity construction (invalid or blank string fields)
//! - Aggregate invariants (links naming unknown nodes)
//! - Analysis over prerequisite chains

use std::fmt;

/// Which endpoint of a link failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkEnd {
    /// The `source` endpoint
    Source,
    /// The `target` endpoint
    Target,
}

impl LinkEnd {
    /// Lowercase wire name of the endpoint
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for LinkEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by entity constructors and the `ConceptGraph` aggregate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Caller-supplied value is absent, blank or otherwise unusable
    #[error("{field} {reason}")]
    InvalidArgument {
        /// Human-readable field label, e.g. `ID` or `Source ID`
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// A link names a node that is not part of the graph
    #[error("{end} node '{id}' not found")]
    DanglingReference {
        /// Side of the link that failed to resolve
        end: LinkEnd,
        /// The unresolved node id
        id: String,
    },

    /// Prerequisite links form a cycle, so no learning order exists
    #[error("circular prerequisite dependencies detected")]
    PrerequisiteCycle,
}

impl ModelError {
    /// Create error for an absent value
    #[inline]
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::InvalidArgument {
            field,
            reason: "cannot be null",
        }
    }

    /// Create error for an empty or whitespace-only value
    #[inline]
    #[must_use]
    pub fn blank(field: &'static str) -> Self {
        Self::InvalidArgument {
            field,
            reason: "cannot be empty or blank",
        }
    }

    /// Create error for an unresolved link endpoint
    #[inline]
    pub fn dangling(end: LinkEnd, id: impl Into<String>) -> Self {
        Self::DanglingReference { end, id: id.into() }
    }

    /// Field label carried by an `InvalidArgument` error
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        assert_eq!(ModelError::missing("ID").to_string(), "ID cannot be null");
        assert_eq!(
            ModelError::blank("Name").to_string(),
            "Name cannot be empty or blank"
        );
    }

    #[test]
    fn dangling_reference_names_side_and_id() {
        let err = ModelError::dangling(LinkEnd::Target, "b");
        assert_eq!(err.to_string(), "target node 'b' not found");
    }

    #[test]
    fn field_accessor() {
        assert_eq!(ModelError::blank("Version").field(), Some("Version"));
        assert_eq!(ModelError::PrerequisiteCycle.field(), None);
    }
}
