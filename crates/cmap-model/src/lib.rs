//! Concept Map Model
//!
//! Immutable entity records and the `ConceptGraph` aggregate that owns them.
//!
//! # Invariants
//!
//! - Entity constructors validate and trim every string field
//! - Node ids are unique; links are unique by value
//! - A link can only be added once both of its endpoints exist
//! - Accessors hand out snapshots, never references into mutable state
//!
//! # Example
//!
//! ```rust
//! use cmap_model::{ConceptGraph, ConceptNode, Link, Metadata};
//!
//! # fn main() -> Result<(), cmap_model::ModelError> {
//! let mut graph = ConceptGraph::new(Metadata::new("1.0", "Intro to programming")?);
//! graph.add_node(ConceptNode::new("variables", "Variables", "")?);
//! graph.add_node(ConceptNode::new("loops", "Loops", "")?);
//! graph.add_link(Link::new("variables", "loops", "PREREQUISITE")?)?;
//!
//! assert_eq!(graph.link_count(), 1);
//! assert!(graph.add_link(Link::related("loops", "arrays")?).is_err());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod analysis;
pub mod error;
pub mod graph;
pub mod link;
pub mod metadata;
pub mod node;
pub mod validate;

// Re-exports for convenience
pub use analysis::GraphStats;
pub use error::{LinkEnd, ModelError, ModelResult};
pub use graph::ConceptGraph;
pub use link::{Link, RelationshipKind, DEFAULT_RELATIONSHIP_TYPE};
pub use metadata::Metadata;
pub use node::ConceptNode;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
