//! Graph-level metadata

use crate::error::ModelResult;
use crate::validate::{require_non_blank, require_trimmed_or_empty};
use std::fmt;

/// Version and description of a concept map as a whole
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Metadata {
    version: String,
    description: String,
}

impl Metadata {
    /// Create metadata
    ///
    /// `version` must be non-blank. `description` may be empty but not
    /// whitespace-only. Both are trimmed.
    ///
    /// # Errors
    /// `ModelError::InvalidArgument` naming the rejected field
    pub fn new(version: impl AsRef<str>, description: impl AsRef<str>) -> ModelResult<Self> {
        let version = require_non_blank("Version", version.as_ref())?;
        let description = require_trimmed_or_empty("Description", description.as_ref())?;
        Ok(Self {
            version: version.to_owned(),
            description: description.to_owned(),
        })
    }

    /// Document version string
    #[inline]
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Document description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metadata{{version='{}', description='{}'}}",
            self.version, self.description
        )
    }
}
