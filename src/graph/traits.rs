// Graph trait abstraction for community partitions
use std::rc::Rc;
use std::sync::Arc;

use super::Direction;

/// Read-only graph access needed to administer a vertex partition.
///
/// Nodes are dense indices `0..node_count()`, edges dense ids
/// `0..edge_count()`. Every edge end is listed once in the incidence list
/// of its node:
///
/// - undirected graphs return the full incidence list for every
///   [`Direction`], so a self-loop appears twice in it;
/// - directed graphs list out-edges for [`Direction::Out`], in-edges for
///   [`Direction::In`] (a self-loop once in each) and both for
///   [`Direction::All`].
///
/// `neighbors` and `incident_edges` are parallel lists. Implementors must not
/// mutate through `&self`; a graph may be shared by many partitions.
pub trait CommunityGraph {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Whether edges are directed.
    fn is_directed(&self) -> bool;

    /// Size of node `v` (1 for an original node, the member count for a
    /// super-node of a collapsed graph).
    fn node_size(&self, v: usize) -> usize;

    /// Neighbor node of each incident edge of `v` in direction `dir`.
    fn neighbors(&self, v: usize, dir: Direction) -> &[usize];

    /// Edge id of each incident edge of `v`, parallel to [`neighbors`](Self::neighbors).
    fn incident_edges(&self, v: usize, dir: Direction) -> &[usize];

    /// Weight of edge `e`.
    fn edge_weight(&self, e: usize) -> f64;

    /// Null-model number of possible edges in a community of total size `n`.
    fn possible_edges(&self, n: usize) -> f64;

    /// Number of incident edge ends of `v` in direction `dir`.
    fn degree(&self, v: usize, dir: Direction) -> usize {
        self.neighbors(v, dir).len()
    }

    /// Iterator over `(neighbor, edge weight)` pairs of `v` in direction `dir`.
    fn weighted_neighbors(
        &self,
        v: usize,
        dir: Direction,
    ) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.neighbors(v, dir)
            .iter()
            .zip(self.incident_edges(v, dir))
            .map(move |(&u, &e)| (u, self.edge_weight(e)))
    }
}

macro_rules! forward_community_graph {
    ($($ptr:ty),*) => {$(
        impl<G: CommunityGraph + ?Sized> CommunityGraph for $ptr {
            #[inline]
            fn node_count(&self) -> usize {
                (**self).node_count()
            }
            #[inline]
            fn edge_count(&self) -> usize {
                (**self).edge_count()
            }
            #[inline]
            fn is_directed(&self) -> bool {
                (**self).is_directed()
            }
            #[inline]
            fn node_size(&self, v: usize) -> usize {
                (**self).node_size(v)
            }
            #[inline]
            fn neighbors(&self, v: usize, dir: Direction) -> &[usize] {
                (**self).neighbors(v, dir)
            }
            #[inline]
            fn incident_edges(&self, v: usize, dir: Direction) -> &[usize] {
                (**self).incident_edges(v, dir)
            }
            #[inline]
            fn edge_weight(&self, e: usize) -> f64 {
                (**self).edge_weight(e)
            }
            #[inline]
            fn possible_edges(&self, n: usize) -> f64 {
                (**self).possible_edges(n)
            }
        }
    )*};
}

// A partition owns its graph when `G` is an owned value or `Box`, and
// borrows or shares it through `&G`, `Rc<G>` or `Arc<G>`.
forward_community_graph!(&G, Box<G>, Rc<G>, Arc<G>);
