//! Testing utilities for the concept map workspace
//!
//! Shared fixtures, documents and proptest strategies.

#![allow(missing_docs)]

use cmap_model::{ConceptGraph, ConceptNode, Link, Metadata};
use proptest::prelude::*;

/// A small, valid document covering every field and a defaulted one
pub const SAMPLE_DOCUMENT: &str = r#"{
  "metadata": { "version": "1.0", "description": "Programming fundamentals" },
  "nodes": [
    { "id": "variables", "name": "Variables", "description": "Named storage" },
    { "id": "conditionals", "name": "Conditionals" },
    { "id": "loops", "name": "Loops", "description": "Repeating work" },
    { "id": "functions", "name": "Functions", "description": "Reusable blocks" }
  ],
  "links": [
    { "source": "variables", "target": "conditionals", "type": "PREREQUISITE" },
    { "source": "conditionals", "target": "loops", "type": "PREREQUISITE" },
    { "source": "loops", "target": "functions" }
  ]
}"#;

/// Document that references a node it never defines
pub const DANGLING_DOCUMENT: &str = r#"{
  "metadata": { "version": "1.0", "description": "d" },
  "nodes": [ { "id": "a", "name": "A" } ],
  "links": [ { "source": "a", "target": "b" } ]
}"#;

pub fn metadata() -> Metadata {
    Metadata::new("1.0", "test fixture").unwrap()
}

pub fn node(id: &str) -> ConceptNode {
    ConceptNode::new(id, id.to_uppercase(), format!("about {id}")).unwrap()
}

pub fn empty_graph() -> ConceptGraph {
    ConceptGraph::new(metadata())
}

/// Graph holding [`node`] for each id in order, without links
pub fn graph_with_nodes<S: AsRef<str>>(ids: &[S]) -> ConceptGraph {
    let mut graph = empty_graph();
    for id in ids {
        graph.add_node(node(id.as_ref()));
    }
    graph
}

pub fn sample_graph() -> ConceptGraph {
    cmap_codec::decode(SAMPLE_DOCUMENT).unwrap()
}

/// Strategy for a node id that survives trimming unchanged
pub fn arb_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,9}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,.\"\\\\/é-]{0,24}"
}

/// Strategy for a valid graph with up to `max_nodes` nodes and random links
/// between them
pub fn arb_graph(max_nodes: usize) -> impl Strategy<Value = ConceptGraph> {
    let kinds = prop_oneof![
        Just("PREREQUISITE"),
        Just("RELATED_TO"),
        Just("PART_OF"),
        Just("custom-type"),
    ];
    (
        prop::collection::vec((arb_id(), "[A-Z][a-z]{0,8}", arb_text()), 1..=max_nodes),
        prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>(), kinds), 0..(max_nodes * 2)),
        "[0-9]\\.[0-9]",
        arb_text(),
    )
        .prop_map(|(nodes, links, version, description)| {
            let description = description.trim().to_owned();
            let mut graph = ConceptGraph::new(Metadata::new(version, description).unwrap());
            for (id, name, desc) in nodes {
                graph.add_node(ConceptNode::new(id, name, desc).unwrap());
            }
            let ids: Vec<String> = graph.iter_nodes().map(|n| n.id().to_owned()).collect();
            for (s, t, kind) in links {
                let link = Link::new(s.get(&ids), t.get(&ids), kind).unwrap();
                graph.add_link(link).unwrap();
            }
            graph
        })
}
