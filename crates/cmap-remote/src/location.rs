//! Validated coordinates of a remote document

use cmap_model::validate::require_non_blank;
use cmap_model::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `(owner, repository, path)` of a file on the content host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LocationParts")]
pub struct RemoteLocation {
    owner: String,
    repository: String,
    path: String,
}

#[derive(Deserialize)]
struct LocationParts {
    owner: String,
    repository: String,
    path: String,
}

impl TryFrom<LocationParts> for RemoteLocation {
    type Error = ModelError;

    fn try_from(parts: LocationParts) -> Result<Self, Self::Error> {
        Self::new(parts.owner, parts.repository, parts.path)
    }
}

impl RemoteLocation {
    /// Validate and trim all three parts
    ///
    /// # Errors
    /// `ModelError::InvalidArgument` naming the blank part
    pub fn new(
        owner: impl AsRef<str>,
        repository: impl AsRef<str>,
        path: impl AsRef<str>,
    ) -> Result<Self, ModelError> {
        let owner = require_non_blank("Owner", owner.as_ref())?;
        let repository = require_non_blank("Repository", repository.as_ref())?;
        let path = require_non_blank("File path", path.as_ref())?;
        Ok(Self {
            owner: owner.to_owned(),
            repository: repository.to_owned(),
            path: path.to_owned(),
        })
    }

    /// Repository owner
    #[inline]
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    #[inline]
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// File path inside the repository
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Composite cache key, `owner/repository/path`
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}/{}/{}", self.owner, self.repository, self.path)
    }
}

impl fmt::Display for RemoteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}
