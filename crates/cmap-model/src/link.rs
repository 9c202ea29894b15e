//! Typed directed links between concept nodes

use crate::error::ModelResult;
use crate::validate::require_non_blank;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relationship type assigned when a document leaves it out
pub const DEFAULT_RELATIONSHIP_TYPE: &str = "RELATED_TO";

/// Relationship kinds the concept map understands
///
/// Links store their type as free text; this enum classifies the
/// well-known values for analysis and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    /// Source must be learned before target
    Prerequisite,
    /// Source requires target
    Requires,
    /// Loose association
    RelatedTo,
    /// Source is a component of target
    PartOf,
    /// Concepts with overlapping meaning
    SimilarTo,
    /// Source depends on target
    DependsOn,
}

impl RelationshipKind {
    /// All known kinds in declaration order
    pub const ALL: [Self; 6] = [
        Self::Prerequisite,
        Self::Requires,
        Self::RelatedTo,
        Self::PartOf,
        Self::SimilarTo,
        Self::DependsOn,
    ];

    /// Canonical upper-case name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prerequisite => "PREREQUISITE",
            Self::Requires => "REQUIRES",
            Self::RelatedTo => "RELATED_TO",
            Self::PartOf => "PART_OF",
            Self::SimilarTo => "SIMILAR_TO",
            Self::DependsOn => "DEPENDS_ON",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown relationship type: '{wanted}'"))
    }
}

/// A directed, typed edge between two concept nodes
///
/// Equality is structural over all three fields. A link whose source and
/// target are the same node is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    source_id: String,
    target_id: String,
    relationship_type: String,
}

impl Link {
    /// Create a link, trimming every field
    ///
    /// # Errors
    /// `ModelError::InvalidArgument` if any field is blank
    pub fn new(
        source_id: impl AsRef<str>,
        target_id: impl AsRef<str>,
        relationship_type: impl AsRef<str>,
    ) -> ModelResult<Self> {
        let source_id = require_non_blank("Source ID", source_id.as_ref())?;
        let target_id = require_non_blank("Target ID", target_id.as_ref())?;
        let relationship_type = require_non_blank("Relationship type", relationship_type.as_ref())?;
        Ok(Self {
            source_id: source_id.to_owned(),
            target_id: target_id.to_owned(),
            relationship_type: relationship_type.to_owned(),
        })
    }

    /// Create a link with the default `RELATED_TO` type
    ///
    /// # Errors
    /// `ModelError::InvalidArgument` if either endpoint is blank
    pub fn related(source_id: impl AsRef<str>, target_id: impl AsRef<str>) -> ModelResult<Self> {
        Self::new(source_id, target_id, DEFAULT_RELATIONSHIP_TYPE)
    }

    /// Id of the node the link starts at
    #[inline]
    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Id of the node the link points to
    #[inline]
    #[must_use]
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Relationship type as written in the source document
    #[inline]
    #[must_use]
    pub fn relationship_type(&self) -> &str {
        &self.relationship_type
    }

    /// Well-known kind of this link, if the type names one
    #[must_use]
    pub fn kind(&self) -> Option<RelationshipKind> {
        self.relationship_type.parse().ok()
    }

    /// Whether source and target are the same node
    #[inline]
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source_id == self.target_id
    }

    /// Whether either endpoint is `node_id`
    #[inline]
    #[must_use]
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Link{{sourceId='{}', targetId='{}', type='{}'}}",
            self.source_id, self.target_id, self.relationship_type
        )
    }
}
