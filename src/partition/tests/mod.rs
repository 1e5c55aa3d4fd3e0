use super::*;
#[path = "partition_property_tests.rs"]
mod partition_property_tests;

use crate::graph::{Graph, GraphConfig};

#[test]
fn partitions_are_send_when_graph_is() {
    fn assert_send<T: Send>() {}
    assert_send::<MutableVertexPartition<Graph>>();
    assert_send::<MutableVertexPartition<std::sync::Arc<Graph>>>();
    assert_send::<MutableVertexPartition<&Graph>>();
}

#[test]
fn clone_is_independent() {
    let g = Graph::from_unweighted_edges(3, &[(0, 1), (1, 2)], GraphConfig::undirected()).unwrap();
    let mut a = MutableVertexPartition::new(&g);
    let b = a.clone();
    a.move_node(0, 1);
    assert_eq!(a.membership(), &[1, 1, 2]);
    assert_eq!(b.membership(), &[0, 1, 2]);
    assert_eq!(b.csize(1), 1);
    assert_eq!(b.empty_communities(), &[] as &[usize]);
}
