//! Concept map wire codec
//!
//! Decodes one JSON document into a `ConceptGraph` and encodes the
//! reverse direction:
//!
//! ```text
//! {
//!   "metadata": { "version": "...", "description": "..." },
//!   "nodes": [ { "id": "...", "name": "...", "description": "..."? } ],
//!   "links": [ { "source": "...", "target": "...", "type": "..."? } ]
//! }
//! ```
//!
//! Decoding reads metadata, then every node, then every link, and only then
//! assembles the graph with nodes ahead of links so endpoint checks can
//! succeed regardless of document order.

use crate::error::{CodecError, CodecResult};
use crate::json::{array_field, optional_text_field, require_valid_json, text_field};
use cmap_model::{ConceptGraph, ConceptNode, Link, Metadata, DEFAULT_RELATIONSHIP_TYPE};
use serde::Serialize;
use serde_json::Value;

const METADATA_FIELD: &str = "metadata";
const NODES_FIELD: &str = "nodes";
const LINKS_FIELD: &str = "links";
const VERSION_FIELD: &str = "version";
const DESCRIPTION_FIELD: &str = "description";
const ID_FIELD: &str = "id";
const NAME_FIELD: &str = "name";
const SOURCE_FIELD: &str = "source";
const TARGET_FIELD: &str = "target";
const TYPE_FIELD: &str = "type";

/// Decode a concept map document
///
/// # Errors
/// - `CodecError::Malformed` for invalid JSON or a missing `metadata` section
/// - `CodecError::MissingField` naming a required field that is absent or not text
/// - `CodecError::Model` for entity or aggregate violations, including
///   `ModelError::DanglingReference`
pub fn decode(text: &str) -> CodecResult<ConceptGraph> {
    let root = require_valid_json(text)?;

    let metadata = root
        .get(METADATA_FIELD)
        .ok_or_else(|| CodecError::malformed("JSON must contain metadata section"))
        .and_then(parse_metadata)?;

    let nodes = array_field(&root, NODES_FIELD)
        .iter()
        .map(parse_node)
        .collect::<CodecResult<Vec<_>>>()?;

    let links = array_field(&root, LINKS_FIELD)
        .iter()
        .map(parse_link)
        .collect::<CodecResult<Vec<_>>>()?;

    let mut graph = ConceptGraph::new(metadata);
    for node in nodes {
        graph.add_node(node);
    }
    for link in links {
        graph.add_link(link)?;
    }
    Ok(graph)
}

/// Parse the `metadata` object
///
/// # Errors
/// `CodecError::MissingField` for `version` or `description`
pub fn parse_metadata(value: &Value) -> CodecResult<Metadata> {
    let version = text_field(value, VERSION_FIELD)?;
    let description = text_field(value, DESCRIPTION_FIELD)?;
    Ok(Metadata::new(version, description)?)
}

/// Parse one entry of `nodes`; a missing description becomes `""`
///
/// # Errors
/// `CodecError::MissingField` for `id` or `name`
pub fn parse_node(value: &Value) -> CodecResult<ConceptNode> {
    let id = text_field(value, ID_FIELD)?;
    let name = text_field(value, NAME_FIELD)?;
    let description = optional_text_field(value, DESCRIPTION_FIELD)?.unwrap_or_default();
    Ok(ConceptNode::new(id, name, description)?)
}

/// Parse one entry of `links`; a missing type becomes `RELATED_TO`
///
/// # Errors
/// `CodecError::MissingField` for `source` or `target`
pub fn parse_link(value: &Value) -> CodecResult<Link> {
    let source = text_field(value, SOURCE_FIELD)?;
    let target = text_field(value, TARGET_FIELD)?;
    let relationship_type =
        optional_text_field(value, TYPE_FIELD)?.unwrap_or(DEFAULT_RELATIONSHIP_TYPE);
    Ok(Link::new(source, target, relationship_type)?)
}

#[derive(Serialize)]
struct WireDocument<'a> {
    metadata: WireMetadata<'a>,
    nodes: Vec<WireNode<'a>>,
    links: Vec<WireLink<'a>>,
}

#[derive(Serialize)]
struct WireMetadata<'a> {
    version: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct WireNode<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct WireLink<'a> {
    source: &'a str,
    target: &'a str,
    #[serde(rename = "type")]
    relationship_type: &'a str,
}

impl<'a> WireDocument<'a> {
    fn from_graph(graph: &'a ConceptGraph) -> Self {
        let metadata = graph.metadata();
        Self {
            metadata: WireMetadata {
                version: metadata.version(),
                description: metadata.description(),
            },
            nodes: graph
                .iter_nodes()
                .map(|n| WireNode {
                    id: n.id(),
                    name: n.name(),
                    description: n.description(),
                })
                .collect(),
            links: graph
                .iter_links()
                .map(|l| WireLink {
                    source: l.source_id(),
                    target: l.target_id(),
                    relationship_type: l.relationship_type(),
                })
                .collect(),
        }
    }
}

/// Encode a graph as compact JSON, in node and link insertion order
///
/// # Errors
/// `CodecError::Serialize` if serialization fails
pub fn encode(graph: &ConceptGraph) -> CodecResult<String> {
    serde_json::to_string(&WireDocument::from_graph(graph)).map_err(CodecError::Serialize)
}

/// Encode a graph as indented JSON
///
/// # Errors
/// `CodecError::Serialize` if serialization fails
pub fn encode_pretty(graph: &ConceptGraph) -> CodecResult<String> {
    serde_json::to_string_pretty(&WireDocument::from_graph(graph)).map_err(CodecError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_model::{LinkEnd, ModelError};
    use serde_json::json;

    #[test]
    fn decodes_minimal_document() {
        let graph = decode(
            r#"{"metadata":{"version":"1.0","description":"d"},"nodes":[{"id":"a","name":"A"}],"links":[]}"#,
        )
        .unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.link_count(), 0);
        assert_eq!(graph.find_node_by_id("a").unwrap().description(), "");
        assert_eq!(graph.metadata().version(), "1.0");
    }

    #[test]
    fn missing_arrays_are_empty() {
        let graph = decode(r#"{"metadata":{"version":"1","description":""}}"#).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.link_count(), 0);
    }

    #[test]
    fn non_array_sections_are_ignored() {
        let graph =
            decode(r#"{"metadata":{"version":"1","description":""},"nodes":{},"links":"x"}"#)
                .unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn missing_metadata() {
        let err = decode(r#"{"nodes":[],"links":[]}"#).unwrap_err();
        assert!(err.is_malformed_document());
        assert!(err.to_string().contains("metadata"));
    }

    #[test]
    fn metadata_version_must_be_text() {
        let err = decode(r#"{"metadata":{"version":2,"description":""}}"#).unwrap_err();
        assert!(matches!(err, CodecError::MissingField { field: "version" }));
    }

    #[test]
    fn node_without_name() {
        let err = decode(
            r#"{"metadata":{"version":"1","description":""},"nodes":[{"id":"a"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::MissingField { field: "name" }));
    }

    #[test]
    fn link_without_source() {
        let err = decode(
            r#"{"metadata":{"version":"1","description":""},"nodes":[{"id":"a","name":"A"}],"links":[{"target":"a"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::MissingField { field: "source" }));
    }

    #[test]
    fn link_type_defaults() {
        let link = parse_link(&json!({"source": "a", "target": "b"})).unwrap();
        assert_eq!(link.relationship_type(), "RELATED_TO");
        let link = parse_link(&json!({"source": "a", "target": "b", "type": null})).unwrap();
        assert_eq!(link.relationship_type(), "RELATED_TO");
    }

    #[test]
    fn blank_node_id_is_a_model_error() {
        let err = parse_node(&json!({"id": "  ", "name": "A"})).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Model(ModelError::InvalidArgument { field: "ID", .. })
        ));
    }

    #[test]
    fn dangling_link_fails_decode() {
        let err = decode(
            r#"{"metadata":{"version":"1","description":""},"nodes":[{"id":"a","name":"A"}],"links":[{"source":"a","target":"b"}]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.as_model(),
            Some(&ModelError::dangling(LinkEnd::Target, "b"))
        );
    }

    #[test]
    fn links_may_precede_nodes_in_document() {
        let graph = decode(
            r#"{"links":[{"source":"a","target":"b","type":"PART_OF"}],"nodes":[{"id":"a","name":"A"},{"id":"b","name":"B"}],"metadata":{"version":"1","description":""}}"#,
        )
        .unwrap();
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn duplicates_are_collapsed() {
        let graph = decode(
            r#"{"metadata":{"version":"1","description":""},
                "nodes":[{"id":"a","name":"A"},{"id":"a","name":"Again"}],
                "links":[{"source":"a","target":"a"},{"source":"a","target":"a","type":"RELATED_TO"}]}"#,
        )
        .unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.find_node_by_id("a").unwrap().name(), "A");
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn encode_emits_wire_keys() {
        let graph = decode(
            r#"{"metadata":{"version":"1.0","description":"d"},"nodes":[{"id":"a","name":"A"}],"links":[{"source":"a","target":"a"}]}"#,
        )
        .unwrap();
        let value: Value = serde_json::from_str(&encode(&graph).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "metadata": {"version": "1.0", "description": "d"},
                "nodes": [{"id": "a", "name": "A", "description": ""}],
                "links": [{"source": "a", "target": "a", "type": "RELATED_TO"}]
            })
        );
    }

    #[test]
    fn pretty_encoding_is_multiline() {
        let graph = decode(r#"{"metadata":{"version":"1","description":""}}"#).unwrap();
        assert!(encode_pretty(&graph).unwrap().contains('\n'));
    }
}
