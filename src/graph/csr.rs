//! CSR (compressed sparse row) graph implementing [`CommunityGraph`].
//!
//! Immutable after construction. Each direction keeps its own offset /
//! neighbor / edge-id triple, so incidence lists are contiguous slices and
//! iteration order is the edge insertion order.

use super::{CommunityGraph, Direction, GraphConfig};
use crate::partition_error::{PartitionError, Result};

/// Offsets plus parallel neighbor and edge-id arrays for one direction.
#[derive(Debug, Clone, Default, PartialEq)]
struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
    edge_ids: Vec<usize>,
}

impl Adjacency {
    /// Build from per-node lists of `(neighbor, edge id)`.
    fn from_lists(lists: Vec<Vec<(usize, usize)>>) -> Self {
        let total = lists.iter().map(Vec::len).sum();
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut targets = Vec::with_capacity(total);
        let mut edge_ids = Vec::with_capacity(total);
        offsets.push(0);
        for list in lists {
            for (u, e) in list {
                targets.push(u);
                edge_ids.push(e);
            }
            offsets.push(targets.len());
        }
        Self {
            offsets,
            targets,
            edge_ids,
        }
    }

    #[inline]
    fn range(&self, v: usize) -> std::ops::Range<usize> {
        self.offsets[v]..self.offsets[v + 1]
    }
}

/// A weighted, possibly directed graph with node sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    config: GraphConfig,
    node_count: usize,
    edges: Vec<(usize, usize)>,
    weights: Vec<f64>,
    node_sizes: Vec<usize>,
    out: Adjacency,
    // Directed graphs only; undirected graphs answer every direction from `out`.
    inc: Adjacency,
    all: Adjacency,
}

static_assertions::assert_impl_all!(Graph: Send, Sync);

impl Graph {
    /// Construct a graph from `(source, target, weight)` triples.
    ///
    /// Edge ids follow the order of `edges`. Self-loops and parallel edges
    /// are kept as given. All node sizes default to 1.
    pub fn from_edges(
        node_count: usize,
        edges: &[(usize, usize, f64)],
        config: GraphConfig,
    ) -> Result<Self> {
        for (e, &(u, v, w)) in edges.iter().enumerate() {
            for node in [u, v] {
                if node >= node_count {
                    return Err(PartitionError::NodeOutOfRange { node, node_count });
                }
            }
            if !w.is_finite() {
                return Err(PartitionError::InvalidWeight { edge: e, weight: w });
            }
        }

        let mut out_lists = vec![Vec::new(); node_count];
        let mut in_lists = vec![Vec::new(); node_count];
        for (e, &(u, v, _)) in edges.iter().enumerate() {
            out_lists[u].push((v, e));
            if config.directed {
                in_lists[v].push((u, e));
            } else {
                // Both ends go into the same list; a self-loop lands twice.
                out_lists[v].push((u, e));
            }
        }

        let (inc, all) = if config.directed {
            let all_lists = out_lists
                .iter()
                .zip(&in_lists)
                .map(|(o, i)| o.iter().chain(i).copied().collect())
                .collect();
            (
                Adjacency::from_lists(in_lists),
                Adjacency::from_lists(all_lists),
            )
        } else {
            (Adjacency::default(), Adjacency::default())
        };

        Ok(Self {
            config,
            node_count,
            edges: edges.iter().map(|&(u, v, _)| (u, v)).collect(),
            weights: edges.iter().map(|&(_, _, w)| w).collect(),
            node_sizes: vec![1; node_count],
            out: Adjacency::from_lists(out_lists),
            inc,
            all,
        })
    }

    /// Construct a graph where every edge has weight 1.
    pub fn from_unweighted_edges(
        node_count: usize,
        edges: &[(usize, usize)],
        config: GraphConfig,
    ) -> Result<Self> {
        let weighted: Vec<_> = edges.iter().map(|&(u, v)| (u, v, 1.0)).collect();
        Self::from_edges(node_count, &weighted, config)
    }

    /// Replace the node sizes (one entry per node).
    pub fn with_node_sizes(mut self, node_sizes: Vec<usize>) -> Result<Self> {
        if node_sizes.len() != self.node_count {
            return Err(PartitionError::LengthMismatch {
                what: "node_sizes",
                expected: self.node_count,
                found: node_sizes.len(),
            });
        }
        self.node_sizes = node_sizes;
        Ok(self)
    }

    /// Graph conventions this graph was built with.
    #[inline]
    pub fn config(&self) -> GraphConfig {
        self.config
    }

    /// Endpoints of edge `e` as given at construction.
    #[inline]
    pub fn edge(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Sum of all node sizes.
    pub fn total_size(&self) -> usize {
        self.node_sizes.iter().sum()
    }

    #[inline]
    fn adjacency(&self, dir: Direction) -> &Adjacency {
        if !self.config.directed {
            return &self.out;
        }
        match dir {
            Direction::Out => &self.out,
            Direction::In => &self.inc,
            Direction::All => &self.all,
        }
    }
}

impl CommunityGraph for Graph {
    #[inline]
    fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    fn is_directed(&self) -> bool {
        self.config.directed
    }

    #[inline]
    fn node_size(&self, v: usize) -> usize {
        self.node_sizes[v]
    }

    #[inline]
    fn neighbors(&self, v: usize, dir: Direction) -> &[usize] {
        let adj = self.adjacency(dir);
        &adj.targets[adj.range(v)]
    }

    #[inline]
    fn incident_edges(&self, v: usize, dir: Direction) -> &[usize] {
        let adj = self.adjacency(dir);
        &adj.edge_ids[adj.range(v)]
    }

    #[inline]
    fn edge_weight(&self, e: usize) -> f64 {
        self.weights[e]
    }

    fn possible_edges(&self, n: usize) -> f64 {
        let n = n as f64;
        let pairs = if self.config.correct_self_loops {
            n * n
        } else {
            n * (n - 1.0)
        };
        if self.config.directed { pairs } else { pairs / 2.0 }
    }
}
