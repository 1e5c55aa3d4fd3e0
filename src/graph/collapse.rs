//! Graph coarsening: collapse every community into one super-node.
//!
//! The collapsed graph is what the next level of a hierarchical
//! Louvain/Leiden run is partitioned on. Super-node `c` stands for community
//! `c`; its size is the community size and its self-loop carries the
//! community's internal weight, so a discrete partition of the collapsed
//! graph reproduces the aggregates of the partition it was built from.

use hashbrown::HashMap;
use itertools::Itertools;

use super::{CommunityGraph, Direction, Graph};
use crate::partition_error::{PartitionError, Result};

impl Graph {
    /// Collapse the communities given by `membership` into super-nodes.
    ///
    /// Every id in `membership` must be below `community_count`. Parallel
    /// edges between two communities are merged by summing their weights;
    /// edges are emitted sorted by endpoint pair.
    pub fn collapse(&self, membership: &[usize], community_count: usize) -> Result<Graph> {
        let n = self.node_count();
        if membership.len() != n {
            return Err(PartitionError::LengthMismatch {
                what: "membership",
                expected: n,
                found: membership.len(),
            });
        }
        if let Some(&community) = membership.iter().find(|&&c| c >= community_count) {
            return Err(PartitionError::CommunityOutOfRange {
                community,
                limit: community_count,
            });
        }

        let directed = self.is_directed();
        let mut between: HashMap<(usize, usize), f64> = HashMap::new();
        for v in 0..n {
            let cv = membership[v];
            for (u, w) in self.weighted_neighbors(v, Direction::Out) {
                let cu = membership[u];
                let key = if directed { (cv, cu) } else { (cv.min(cu), cv.max(cu)) };
                *between.entry(key).or_insert(0.0) += w;
            }
        }

        // Undirected edges were seen from both ends.
        let scale = if directed { 1.0 } else { 0.5 };
        let edges: Vec<(usize, usize, f64)> = between
            .into_iter()
            .sorted_unstable_by_key(|&(pair, _)| pair)
            .map(|((a, b), w)| (a, b, w * scale))
            .collect();

        let mut sizes = vec![0usize; community_count];
        for (v, &c) in membership.iter().enumerate() {
            sizes[c] += self.node_size(v);
        }

        log::debug!(
            "collapsed graph of {n} nodes into {community_count} super-nodes with {} edges",
            edges.len()
        );
        Graph::from_edges(community_count, &edges, self.config())?.with_node_sizes(sizes)
    }
}
