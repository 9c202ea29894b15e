//! Concept nodes

use crate::error::ModelResult;
use crate::validate::require_non_blank;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single addressable topic in the concept map
///
/// Identity is the `id` alone: two nodes with the same id are equal no
/// matter their name or description. The description is the only field
/// that may change after construction.
#[derive(Debug, Clone)]
pub struct ConceptNode {
    id: String,
    name: String,
    description: String,
}

impl ConceptNode {
    /// Create a node, trimming `id` and `name`
    ///
    /// # Errors
    /// `ModelError::InvalidArgument` if `id` or `name` is blank
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        description: impl Into<String>,
    ) -> ModelResult<Self> {
        let id = require_non_blank("ID", id.as_ref())?;
        let name = require_non_blank("Name", name.as_ref())?;
        Ok(Self {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.into(),
        })
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description, empty when none was given
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the description; `None` clears it
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description.unwrap_or_default();
    }
}

impl PartialEq for ConceptNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConceptNode {}

impl Hash for ConceptNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ConceptNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node{{id='{}', name='{}'}}", self.id, self.name)
    }
}
