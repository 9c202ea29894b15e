use cmap_codec::{decode, encode, encode_pretty, has_fields, is_syntactically_valid_json, CodecError};
use cmap_model::{ConceptNode, Link, LinkEnd, ModelError};
use cmap_test_utils::{arb_graph, sample_graph, DANGLING_DOCUMENT, SAMPLE_DOCUMENT};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn sample_document_decodes() {
    let graph = sample_graph();
    assert_eq!(graph.metadata().description(), "Programming fundamentals");
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.link_count(), 3);
    assert_eq!(graph.find_node_by_id("conditionals").unwrap().description(), "");

    let types: Vec<&str> = graph.iter_links().map(Link::relationship_type).collect();
    assert_eq!(types, ["PREREQUISITE", "PREREQUISITE", "RELATED_TO"]);
}

#[test]
fn encoded_sample_is_exact() {
    let expected = concat!(
        r#"{"metadata":{"version":"1.0","description":"Programming fundamentals"},"#,
        r#""nodes":[{"id":"variables","name":"Variables","description":"Named storage"},"#,
        r#"{"id":"conditionals","name":"Conditionals","description":""},"#,
        r#"{"id":"loops","name":"Loops","description":"Repeating work"},"#,
        r#"{"id":"functions","name":"Functions","description":"Reusable blocks"}],"#,
        r#""links":[{"source":"variables","target":"conditionals","type":"PREREQUISITE"},"#,
        r#"{"source":"conditionals","target":"loops","type":"PREREQUISITE"},"#,
        r#"{"source":"loops","target":"functions","type":"RELATED_TO"}]}"#,
    );
    assert_eq!(encode(&sample_graph()).unwrap(), expected);
}

#[test]
fn encoded_output_passes_validation() {
    let text = encode_pretty(&sample_graph()).unwrap();
    assert!(is_syntactically_valid_json(&text));
    assert!(has_fields(&text, &["metadata", "nodes", "links"]).unwrap());
    assert!(has_fields(SAMPLE_DOCUMENT, &["metadata", "nodes", "links"]).unwrap());
}

#[test]
fn dangling_document_reports_missing_target() {
    match decode(DANGLING_DOCUMENT) {
        Err(CodecError::Model(ModelError::DanglingReference { end, id })) => {
            assert_eq!(end, LinkEnd::Target);
            assert_eq!(id, "b");
        }
        other => panic!("expected dangling reference, got {other:?}"),
    }
}

#[test]
fn syntax_errors_are_malformed() {
    let err = decode(r#"{"metadata": {"version": "1""#).unwrap_err();
    assert!(err.is_malformed_document());
    let err = decode("").unwrap_err();
    assert!(err.is_malformed_document());
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(graph in arb_graph(8)) {
        let text = encode(&graph).unwrap();
        let decoded = decode(&text).unwrap();

        prop_assert_eq!(&decoded, &graph);

        let original: Vec<(String, String, String)> = graph
            .iter_nodes()
            .map(|n| (n.id().to_owned(), n.name().to_owned(), n.description().to_owned()))
            .collect();
        let again: Vec<(String, String, String)> = decoded
            .iter_nodes()
            .map(|n: &ConceptNode| (n.id().to_owned(), n.name().to_owned(), n.description().to_owned()))
            .collect();
        prop_assert_eq!(again, original);

        let links: Vec<Link> = decoded.iter_links().cloned().collect();
        let expected: Vec<Link> = graph.iter_links().cloned().collect();
        prop_assert_eq!(links, expected);
    }
}
