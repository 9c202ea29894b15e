//! The `ConceptGraph` aggregate
//!
//! Owns metadata, nodes and links, and keeps them consistent:
//! 1. Every link endpoint names a node already in the graph
//! 2. Node ids are unique
//! 3. Links are unique by structural equality
//! 4. Callers only ever see immutable snapshots
//!
//! Links are checked when they are added, so a graph is never observably
//! inconsistent and downstream consumers can render it without re-checking.

use crate::error::{LinkEnd, ModelError, ModelResult};
use crate::link::Link;
use crate::metadata::Metadata;
use crate::node::ConceptNode;
use im::Vector;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Validated concept map
#[derive(Debug, Clone)]
pub struct ConceptGraph {
    metadata: Metadata,
    nodes: Vector<ConceptNode>,
    /// node id -> position in `nodes`
    node_index: HashMap<String, usize>,
    links: Vector<Link>,
    link_set: HashSet<Link>,
}

impl ConceptGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            nodes: Vector::new(),
            node_index: HashMap::new(),
            links: Vector::new(),
            link_set: HashSet::new(),
        }
    }

    /// Graph metadata
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Add a node
    ///
    /// Returns `false` without changing the graph when a node with the same
    /// id is already present.
    pub fn add_node(&mut self, node: ConceptNode) -> bool {
        if self.node_index.contains_key(node.id()) {
            return false;
        }
        self.node_index.insert(node.id().to_owned(), self.nodes.len());
        self.nodes.push_back(node);
        true
    }

    /// Add a link whose endpoints are already in the graph
    ///
    /// Returns `Ok(false)` without changing the graph for a duplicate link.
    ///
    /// # Errors
    /// `ModelError::DanglingReference` naming the first unresolved endpoint
    /// (source is checked before target). The graph is left unchanged.
    pub fn add_link(&mut self, link: Link) -> ModelResult<bool> {
        if !self.contains_node(link.source_id()) {
            return Err(ModelError::dangling(LinkEnd::Source, link.source_id()));
        }
        if !self.contains_node(link.target_id()) {
            return Err(ModelError::dangling(LinkEnd::Target, link.target_id()));
        }
        if self.link_set.contains(&link) {
            return Ok(false);
        }
        self.link_set.insert(link.clone());
        self.links.push_back(link);
        Ok(true)
    }

    /// Look up a node by id
    #[must_use]
    pub fn find_node_by_id(&self, id: &str) -> Option<&ConceptNode> {
        self.node_index.get(id).and_then(|&pos| self.nodes.get(pos))
    }

    /// Whether a node with `id` exists
    #[inline]
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// True when the graph has no nodes, regardless of links
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links
    #[inline]
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Snapshot of the nodes in insertion order
    ///
    /// Structurally shared with the graph; changes to the returned vector
    /// never reach the graph.
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> Vector<ConceptNode> {
        self.nodes.clone()
    }

    /// Snapshot of the links in insertion order
    #[inline]
    #[must_use]
    pub fn links(&self) -> Vector<Link> {
        self.links.clone()
    }

    /// Iterate nodes in insertion order
    pub fn iter_nodes(&self) -> impl Iterator<Item = &ConceptNode> {
        self.nodes.iter()
    }

    /// Iterate links in insertion order
    pub fn iter_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Links starting at `id`
    pub fn links_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.source_id() == id)
    }

    /// Links ending at `id`
    pub fn links_to<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.target_id() == id)
    }
}

impl PartialEq for ConceptGraph {
    /// Same metadata and the same node and link sets, in any order
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata
            && self.node_index.len() == other.node_index.len()
            && self
                .node_index
                .keys()
                .all(|id| other.node_index.contains_key(id))
            && self.link_set == other.link_set
    }
}

impl Eq for ConceptGraph {}

impl fmt::Display for ConceptGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConceptGraph{{metadata={}, nodes={} nodes, links={} links}}",
            self.metadata,
            self.nodes.len(),
            self.links.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> ConceptGraph {
        ConceptGraph::new(Metadata::new("1.0", "test").unwrap())
    }

    fn node(id: &str) -> ConceptNode {
        ConceptNode::new(id, id.to_uppercase(), "").unwrap()
    }

    #[test]
    fn new_graph_is_empty() {
        let g = graph();
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.link_count(), 0);
    }

    #[test]
    fn add_node_deduplicates_by_id() {
        let mut g = graph();
        assert!(g.add_node(node("a")));
        assert!(!g.add_node(ConceptNode::new("a", "Other", "x").unwrap()));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.find_node_by_id("a").unwrap().name(), "A");
    }

    #[test]
    fn add_link_requires_both_endpoints() {
        let mut g = graph();
        g.add_node(node("a"));

        let err = g.add_link(Link::related("x", "a").unwrap()).unwrap_err();
        assert_eq!(err, ModelError::dangling(LinkEnd::Source, "x"));

        let err = g.add_link(Link::related("a", "b").unwrap()).unwrap_err();
        assert_eq!(err, ModelError::dangling(LinkEnd::Target, "b"));
        assert!(err.to_string().contains("'b'"));

        assert_eq!(g.node_count(), 1);
        assert_eq!(g.link_count(), 0);
    }

    #[test]
    fn add_link_deduplicates() {
        let mut g = graph();
        g.add_node(node("a"));
        g.add_node(node("b"));
        assert_eq!(g.add_link(Link::related("a", "b").unwrap()), Ok(true));
        assert_eq!(g.add_link(Link::related("a", "b").unwrap()), Ok(false));
        assert_eq!(g.add_link(Link::new("a", "b", "PART_OF").unwrap()), Ok(true));
        assert_eq!(g.link_count(), 2);
    }

    #[test]
    fn self_loop_is_accepted() {
        let mut g = graph();
        g.add_node(node("a"));
        assert_eq!(g.add_link(Link::related("a", "a").unwrap()), Ok(true));
    }

    #[test]
    fn links_do_not_affect_emptiness() {
        let g = graph();
        assert!(g.is_empty());
        let mut g2 = graph();
        g2.add_node(node("a"));
        g2.add_link(Link::related("a", "a").unwrap()).unwrap();
        assert!(!g2.is_empty());
    }

    #[test]
    fn snapshots_do_not_alias() {
        let mut g = graph();
        g.add_node(node("a"));

        let mut snapshot = g.nodes();
        snapshot.push_back(node("b"));
        snapshot[0].set_description(Some("changed".into()));

        assert_eq!(g.node_count(), 1);
        assert_eq!(g.find_node_by_id("a").unwrap().description(), "");
        assert!(g.find_node_by_id("b").is_none());
    }

    #[test]
    fn find_missing_node() {
        assert!(graph().find_node_by_id("nope").is_none());
        assert!(graph().find_node_by_id("").is_none());
    }

    #[test]
    fn insertion_order_preserved() {
        let mut g = graph();
        for id in ["c", "a", "b"] {
            g.add_node(node(id));
        }
        let ids: Vec<_> = g.iter_nodes().map(ConceptNode::id).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn neighbourhood_queries() {
        let mut g = graph();
        for id in ["a", "b", "c"] {
            g.add_node(node(id));
        }
        g.add_link(Link::related("a", "b").unwrap()).unwrap();
        g.add_link(Link::related("a", "c").unwrap()).unwrap();
        g.add_link(Link::related("c", "b").unwrap()).unwrap();

        assert_eq!(g.links_from("a").count(), 2);
        assert_eq!(g.links_to("b").count(), 2);
        assert_eq!(g.links_to("a").count(), 0);
    }

    #[test]
    fn equality_ignores_order() {
        let mut g1 = graph();
        let mut g2 = graph();
        for id in ["a", "b"] {
            g1.add_node(node(id));
        }
        for id in ["b", "a"] {
            g2.add_node(node(id));
        }
        g1.add_link(Link::related("a", "b").unwrap()).unwrap();
        g2.add_link(Link::related("a", "b").unwrap()).unwrap();
        assert_eq!(g1, g2);

        g2.add_link(Link::related("b", "a").unwrap()).unwrap();
        assert_ne!(g1, g2);
    }
}
