use cmap_model::{ConceptNode, Link, LinkEnd, ModelError};
use cmap_test_utils::{empty_graph, graph_with_nodes, metadata, node};
use proptest::prelude::*;

fn id_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}"
}

fn padding() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

#[test]
fn snapshot_order_matches_insertion() {
    let ids = ["z", "m", "a"];
    let graph = graph_with_nodes(&ids);
    let seen: Vec<String> = graph.nodes().iter().map(|n| n.id().to_owned()).collect();
    assert_eq!(seen, ids);
}

#[test]
fn fixture_graph_starts_empty() {
    let mut graph = empty_graph();
    assert!(graph.is_empty());
    assert_eq!(graph.metadata(), &metadata());

    assert!(graph.add_node(node("loops")));
    let stored = graph.find_node_by_id("loops").unwrap();
    assert_eq!(stored.name(), "LOOPS");
    assert_eq!(stored.description(), "about loops");
}

proptest! {
    #[test]
    fn prop_node_fields_are_trimmed(
        id in id_strategy(),
        name in "[A-Za-z][A-Za-z ]{0,15}[A-Za-z]",
        left in padding(),
        right in padding(),
    ) {
        let node = ConceptNode::new(format!("{left}{id}{right}"), format!("{right}{name}{left}"), "").unwrap();
        prop_assert_eq!(node.id(), id.as_str());
        prop_assert_eq!(node.name(), name.as_str());
    }

    #[test]
    fn prop_dangling_link_is_rejected_without_side_effects(
        ids in prop::collection::hash_set(id_strategy(), 1..8),
        missing in "[A-Z]{1,6}",
        missing_on_source in any::<bool>(),
    ) {
        let ids: Vec<String> = ids.into_iter().collect();
        let mut graph = graph_with_nodes(&ids);
        graph.add_link(Link::related(&ids[0], &ids[0]).unwrap()).unwrap();

        let before = (graph.node_count(), graph.link_count());
        let link = if missing_on_source {
            Link::related(&missing, &ids[0]).unwrap()
        } else {
            Link::related(&ids[0], &missing).unwrap()
        };

        let expected_end = if missing_on_source { LinkEnd::Source } else { LinkEnd::Target };
        prop_assert_eq!(
            graph.add_link(link),
            Err(ModelError::DanglingReference { end: expected_end, id: missing.clone() })
        );
        prop_assert_eq!((graph.node_count(), graph.link_count()), before);
    }

    #[test]
    fn prop_add_is_idempotent(
        ids in prop::collection::hash_set(id_strategy(), 2..8),
        kind in prop_oneof![Just("PREREQUISITE"), Just("RELATED_TO"), Just("PART_OF")],
    ) {
        let ids: Vec<String> = ids.into_iter().collect();
        let mut graph = graph_with_nodes(&ids);
        prop_assert!(!graph.add_node(ConceptNode::new(&ids[0], "again", "dup").unwrap()));
        prop_assert_eq!(graph.node_count(), ids.len());

        let link = Link::new(&ids[0], &ids[1], kind).unwrap();
        prop_assert_eq!(graph.add_link(link.clone()), Ok(true));
        prop_assert_eq!(graph.add_link(link), Ok(false));
        prop_assert_eq!(graph.link_count(), 1);
    }
}
