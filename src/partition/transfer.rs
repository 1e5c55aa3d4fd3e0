//! Cross-level transfer between a graph and its collapsed graph.
//!
//! A hierarchical run collapses the communities of a partition into
//! super-nodes ([`collapse_graph`](MutableVertexPartition::collapse_graph)),
//! optimizes a partition of the collapsed graph and then projects that
//! result back onto the finer nodes. Every transfer validates its input
//! completely before touching the partition and ends in one full rebuild.

use std::borrow::Borrow;

use crate::graph::{CommunityGraph, Graph};
use crate::partition_error::{PartitionError, Result};

use super::mutable::{MutableVertexPartition, validate_membership};

impl<G: CommunityGraph> MutableVertexPartition<G> {
    /// Project a partition of the collapsed graph onto this one, using each
    /// node's current community id as its super-node.
    ///
    /// Node `v` ends up in `coarser_membership[membership[v]]`.
    pub fn from_coarser_membership(&mut self, coarser_membership: &[usize]) -> Result<()> {
        let membership = project(coarser_membership, self.membership())?;
        self.install(membership, "coarser membership")
    }

    /// Project a partition of the collapsed graph onto this one through an
    /// explicit node to super-node map.
    ///
    /// Node `v` ends up in `coarser_membership[coarser_node[v]]`.
    pub fn from_coarser_membership_with_nodes(
        &mut self,
        coarser_membership: &[usize],
        coarser_node: &[usize],
    ) -> Result<()> {
        let n = self.node_count();
        if coarser_node.len() != n {
            return Err(PartitionError::LengthMismatch {
                what: "coarser_node",
                expected: n,
                found: coarser_node.len(),
            });
        }
        let membership = project(coarser_membership, coarser_node)?;
        self.install(membership, "coarser membership with explicit super-nodes")
    }

    /// [`from_coarser_membership`](Self::from_coarser_membership) reading the
    /// membership of `coarser`.
    pub fn from_coarser_partition<H: CommunityGraph>(
        &mut self,
        coarser: &MutableVertexPartition<H>,
    ) -> Result<()> {
        self.from_coarser_membership(coarser.membership())
    }

    /// [`from_coarser_membership_with_nodes`](Self::from_coarser_membership_with_nodes)
    /// reading the membership of `coarser`.
    pub fn from_coarser_partition_with_nodes<H: CommunityGraph>(
        &mut self,
        coarser: &MutableVertexPartition<H>,
        coarser_node: &[usize],
    ) -> Result<()> {
        self.from_coarser_membership_with_nodes(coarser.membership(), coarser_node)
    }

    /// Copy the membership of another partition over the same node set.
    pub fn from_partition<H: CommunityGraph>(&mut self, other: &MutableVertexPartition<H>) -> Result<()> {
        let n = self.node_count();
        if other.node_count() != n {
            return Err(PartitionError::LengthMismatch {
                what: "partition membership",
                expected: n,
                found: other.node_count(),
            });
        }
        self.install(other.membership().to_vec(), "copied partition")
    }

    fn install(&mut self, membership: Vec<usize>, source: &str) -> Result<()> {
        validate_membership(self.node_count(), &membership)?;
        log::debug!("transferring {source} onto {} nodes", membership.len());
        self.rebuild(membership);
        Ok(())
    }
}

impl<G: CommunityGraph + Borrow<Graph>> MutableVertexPartition<G> {
    /// Collapse every community into a super-node.
    ///
    /// Super-node `c` stands for community id `c` (empty ids included), so
    /// the discrete partition of the result carries the same aggregates as
    /// this partition.
    pub fn collapse_graph(&self) -> Result<Graph> {
        let graph: &Graph = self.graph().borrow();
        graph.collapse(self.membership(), self.community_count())
    }
}

/// `coarser_membership[coarser_node[v]]` for every `v`.
fn project(coarser_membership: &[usize], coarser_node: &[usize]) -> Result<Vec<usize>> {
    coarser_node
        .iter()
        .enumerate()
        .map(|(node, &super_node)| {
            coarser_membership
                .get(super_node)
                .copied()
                .ok_or(PartitionError::SuperNodeOutOfRange {
                    node,
                    super_node,
                    coarser_len: coarser_membership.len(),
                })
        })
        .collect()
}
