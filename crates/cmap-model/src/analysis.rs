//! Read-only analysis over a validated graph
//!
//! Reports that help authors maintain a concept map: orphaned nodes,
//! summary statistics and the prerequisite learning order. None of these
//! are invariants; a graph with orphans or prerequisite cycles is still a
//! valid `ConceptGraph`.

use crate::error::{ModelError, ModelResult};
use crate::graph::ConceptGraph;
use crate::link::{Link, RelationshipKind};
use crate::node::ConceptNode;
use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Summary numbers for a concept map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Node count
    pub nodes: usize,
    /// Link count
    pub links: usize,
    /// Links per node, 0 for an empty graph
    pub avg_connections: f64,
    /// Link count per relationship type as written
    pub by_kind: BTreeMap<String, usize>,
}

/// Ids of nodes that no link touches, in insertion order
#[must_use]
pub fn orphan_ids(graph: &ConceptGraph) -> Vec<String> {
    let referenced: HashSet<&str> = graph
        .iter_links()
        .flat_map(|l| [l.source_id(), l.target_id()])
        .collect();

    graph
        .iter_nodes()
        .map(ConceptNode::id)
        .filter(|id| !referenced.contains(id))
        .map(str::to_owned)
        .collect()
}

/// Links whose source and target are the same node, in insertion order
///
/// Self-loops are legal; this is an authoring hint.
#[must_use]
pub fn self_loops(graph: &ConceptGraph) -> Vec<&Link> {
    graph.iter_links().filter(|l| l.is_self_loop()).collect()
}

/// Distinct relationship types outside [`RelationshipKind::ALL`], sorted
#[must_use]
pub fn unknown_relationship_types(graph: &ConceptGraph) -> Vec<String> {
    graph
        .iter_links()
        .filter(|l| l.kind().is_none())
        .map(|l| l.relationship_type())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Compute summary statistics
#[must_use]
pub fn stats(graph: &ConceptGraph) -> GraphStats {
    let mut by_kind = BTreeMap::new();
    for link in graph.iter_links() {
        *by_kind
            .entry(link.relationship_type().to_owned())
            .or_insert(0) += 1;
    }

    let nodes = graph.node_count();
    let links = graph.link_count();
    #[allow(clippy::cast_precision_loss)]
    let avg_connections = if nodes == 0 {
        0.0
    } else {
        links as f64 / nodes as f64
    };

    GraphStats {
        nodes,
        links,
        avg_connections,
        by_kind,
    }
}

/// Build the prerequisite graph: an edge `a -> b` means `a` comes before `b`
fn prerequisite_graph(graph: &ConceptGraph) -> DiGraphMap<&str, ()> {
    let mut g = DiGraphMap::new();
    for node in graph.iter_nodes() {
        g.add_node(node.id());
    }
    for link in graph
        .iter_links()
        .filter(|l| l.kind() == Some(RelationshipKind::Prerequisite))
    {
        g.add_edge(link.source_id(), link.target_id(), ());
    }
    g
}

/// Whether the prerequisite links contain a cycle
#[must_use]
pub fn prerequisite_cycle(graph: &ConceptGraph) -> bool {
    is_cyclic_directed(&prerequisite_graph(graph))
}

/// Order every node so each prerequisite precedes the concepts that need it
///
/// # Errors
/// `ModelError::PrerequisiteCycle` if no such order exists
pub fn learning_order(graph: &ConceptGraph) -> ModelResult<Vec<String>> {
    let g = prerequisite_graph(graph);
    match toposort(&g, None) {
        Ok(order) => Ok(order.into_iter().map(str::to_owned).collect()),
        Err(_) => Err(ModelError::PrerequisiteCycle),
    }
}
