//! Mutable vertex partition with incrementally maintained aggregates.
//!
//! [`MutableVertexPartition`] assigns every node of a [`CommunityGraph`] to a
//! community and keeps, for every community id, the statistics a quality
//! function (modularity, CPM, ...) reads: total node size, internal weight,
//! outgoing and incoming weight, plus the global internal weight and
//! possible-edge totals.
//!
//! A full rebuild costs O(n + m) and runs at construction, after renumbering
//! and after cross-level transfer. [`move_node`](MutableVertexPartition::move_node)
//! repairs every aggregate in O(degree) and yields the same values a rebuild
//! of the new membership would, up to floating-point summation order.
//!
//! # Edge conventions
//!
//! Incidence lists follow [`CommunityGraph`]: every edge end is listed once.
//! An undirected edge is therefore seen from both of its nodes (halved in the
//! rebuild), and `move_node` visits each incident edge once per direction.
//! An undirected self-loop is listed twice per direction, so each of its four
//! visits contributes a quarter of its weight.

use crate::debug_invariants;
use crate::debug_invariants::DebugInvariants;
use crate::graph::{CommunityGraph, Direction};
use crate::partition_error::{PartitionError, Result};

use super::aggregates::CommunityAggregates;
use super::cache::{NeighborCache, NeighborWeights};
use super::registry::CommunityRegistry;

/// Relative tolerance used when validating floating-point totals.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// A partition of a graph's nodes into disjoint communities.
///
/// The partition owns its graph when `G` is an owned value (`Graph`,
/// `Box<Graph>`) and releases it on drop; `&Graph`, `Rc<Graph>` and
/// `Arc<Graph>` share it instead.
///
/// Not internally synchronized: mutate one instance from one thread at a
/// time. Many partitions may read the same shared graph concurrently.
#[derive(Debug, Clone)]
pub struct MutableVertexPartition<G> {
    graph: G,
    registry: CommunityRegistry,
    aggregates: CommunityAggregates,
    cache: NeighborCache,
}

impl<G: CommunityGraph> MutableVertexPartition<G> {
    /// Create the discrete partition: every node in its own community.
    pub fn new(graph: G) -> Self {
        let membership = (0..graph.node_count()).collect();
        Self::from_validated(graph, membership)
    }

    /// Create a partition from an explicit membership vector.
    ///
    /// Fails when `membership.len()` differs from the node count or when a
    /// community id is not below the node count.
    pub fn with_membership(graph: G, membership: Vec<usize>) -> Result<Self> {
        validate_membership(graph.node_count(), &membership)?;
        Ok(Self::from_validated(graph, membership))
    }

    fn from_validated(graph: G, membership: Vec<usize>) -> Self {
        let mut partition = Self {
            graph,
            registry: CommunityRegistry::default(),
            aggregates: CommunityAggregates::default(),
            cache: NeighborCache::default(),
        };
        partition.rebuild(membership);
        partition
    }

    // ---------------------------------------------------------------------
    // full rebuild
    // ---------------------------------------------------------------------

    /// Recompute every aggregate from `membership` in O(n + m).
    ///
    /// Resets the empty pool to exactly the ids without members (smallest id
    /// on top) and clears the neighbor cache.
    pub(crate) fn rebuild(&mut self, membership: Vec<usize>) {
        let n = self.graph.node_count();
        debug_assert_eq!(membership.len(), n, "membership length");

        self.registry.rebuild(membership);
        let count = self.registry.community_count();
        self.aggregates.reset(count);
        self.cache.reset(n);

        let undirected = !self.graph.is_directed();
        for v in 0..n {
            let v_comm = self.registry.community_of(v);
            self.aggregates.add_size(v_comm, self.graph.node_size(v));

            for (u, w) in self.graph.weighted_neighbors(v, Direction::Out) {
                let u_comm = self.registry.community_of(u);
                self.aggregates.add_from(v_comm, w);
                self.aggregates.add_to(u_comm, w);
                if v_comm == u_comm {
                    // Each undirected edge is seen from both ends.
                    let w = if undirected { w / 2.0 } else { w };
                    self.aggregates.add_internal(v_comm, w);
                }
            }
        }

        let possible: f64 = (0..count)
            .map(|c| self.graph.possible_edges(self.aggregates.csize(c)))
            .sum();
        self.aggregates.add_possible_edges(possible);

        for c in (0..count).rev() {
            if self.registry.members(c).is_empty() {
                self.registry.push_empty(c);
            }
        }

        log::debug!(
            "rebuilt partition administration: {n} nodes, {count} communities ({} empty), internal weight {}",
            self.registry.empty_pool().len(),
            self.aggregates.total_weight_in()
        );
        debug_invariants!(self.validate_invariants(), "after rebuild");
    }

    // ---------------------------------------------------------------------
    // incremental move
    // ---------------------------------------------------------------------

    /// Move node `v` into community `new_comm`, updating all aggregates in
    /// O(degree(v)).
    ///
    /// Moving a node into its current community does nothing.
    ///
    /// # Panics
    ///
    /// If `v` is not a node or `new_comm >= community_count()`; grow the
    /// registry with [`get_empty_community`](Self::get_empty_community) or
    /// [`add_empty_community`](Self::add_empty_community) first.
    pub fn move_node(&mut self, v: usize, new_comm: usize) {
        assert!(
            new_comm < self.registry.community_count(),
            "community {new_comm} out of range ({} communities)",
            self.registry.community_count()
        );
        let old_comm = self.registry.community_of(v);
        if old_comm == new_comm {
            return;
        }
        let node_size = self.graph.node_size(v);
        let directed = self.graph.is_directed();
        log::trace!("move node {v} (size {node_size}) from {old_comm} to {new_comm}");

        // Closed-form change of the possible-edge total; must use the sizes
        // before the move.
        let size_gap = self.aggregates.csize(new_comm) as f64 - self.aggregates.csize(old_comm) as f64;
        let ns = node_size as f64;
        let delta = 2.0 * ns * (size_gap + ns) / if directed { 1.0 } else { 2.0 };
        self.aggregates.add_possible_edges(delta);

        self.aggregates.remove_size(old_comm, node_size);
        self.aggregates.add_size(new_comm, node_size);

        let edge_share = if directed { 1.0 } else { 2.0 };
        for dir in Direction::OUT_IN {
            for (u, w) in self.graph.weighted_neighbors(v, dir) {
                match dir {
                    Direction::Out => self.aggregates.shift_from(old_comm, new_comm, w),
                    _ => self.aggregates.shift_to(old_comm, new_comm, w),
                }

                let is_loop = u == v;
                let internal = w / edge_share / if is_loop { 2.0 } else { 1.0 };
                // `v` still reads as `old_comm`, so a self-loop leaves it here.
                let u_comm = self.registry.community_of(u);
                if u_comm == old_comm {
                    self.aggregates.remove_internal(old_comm, internal);
                }
                if u_comm == new_comm || is_loop {
                    self.aggregates.add_internal(new_comm, internal);
                }
            }
        }

        let new_was_empty = self.registry.members(new_comm).is_empty();
        self.registry.move_to(v, new_comm);
        if self.registry.members(old_comm).is_empty() {
            self.registry.push_empty(old_comm);
        }
        if new_was_empty {
            self.registry.take_empty(new_comm);
        }
        self.cache.invalidate();
        debug_invariants!(self.validate_invariants(), "after move_node");
    }

    // ---------------------------------------------------------------------
    // registry growth
    // ---------------------------------------------------------------------

    /// Append a new, empty community and put it on the empty pool.
    ///
    /// Fails when the community count would exceed the node count: there is
    /// then necessarily an unused id already.
    pub fn add_empty_community(&mut self) -> Result<usize> {
        let communities = self.registry.community_count() + 1;
        let nodes = self.graph.node_count();
        if communities > nodes {
            log::warn!("refusing to create community {communities} on {nodes} nodes");
            return Err(PartitionError::TooManyCommunities { communities, nodes });
        }
        let comm = self.registry.push_community();
        self.aggregates.push_community();
        self.registry.push_empty(comm);
        Ok(comm)
    }

    /// An empty community id, reusing the most recently emptied one if any.
    ///
    /// The id stays in the pool until a node moves into it.
    pub fn get_empty_community(&mut self) -> Result<usize> {
        match self.registry.peek_empty() {
            Some(comm) => Ok(comm),
            None => self.add_empty_community(),
        }
    }

    // ---------------------------------------------------------------------
    // renumbering
    // ---------------------------------------------------------------------

    /// Renumber communities by decreasing size (ties by increasing old id),
    /// dropping communities without members, then rebuild.
    pub fn renumber_communities(&mut self) {
        let count = self.registry.community_count();
        let mut order: Vec<usize> = (0..count)
            .filter(|&c| !self.registry.members(c).is_empty())
            .collect();
        order.sort_by(|&a, &b| {
            self.aggregates
                .csize(b)
                .cmp(&self.aggregates.csize(a))
                .then(a.cmp(&b))
        });

        let mut new_id = vec![usize::MAX; count];
        for (new, &old) in order.iter().enumerate() {
            new_id[old] = new;
        }
        let membership = self
            .registry
            .membership()
            .iter()
            .map(|&c| new_id[c])
            .collect();

        log::debug!("renumbering {count} community ids into {}", order.len());
        self.rebuild(membership);
    }

    /// Replace the membership with `membership` and rebuild. No ordering of
    /// ids is implied.
    pub fn renumber_communities_with(&mut self, membership: &[usize]) -> Result<()> {
        self.set_membership(membership.to_vec())
    }

    /// Validate and install a complete membership vector, then rebuild.
    pub fn set_membership(&mut self, membership: Vec<usize>) -> Result<()> {
        validate_membership(self.graph.node_count(), &membership)?;
        self.rebuild(membership);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // neighbor-community queries
    // ---------------------------------------------------------------------

    /// Weight between `v` and each neighboring community in direction `dir`.
    ///
    /// Served from the cache when `v` was the last node queried for `dir`
    /// and nothing moved since; otherwise recomputed in O(degree(v)).
    pub fn neighbor_weights(&mut self, v: usize, dir: Direction) -> NeighborWeights<'_> {
        debug_assert!(v < self.graph.node_count(), "node out of range");
        self.cache
            .query(&self.graph, self.registry.membership(), v, dir)
    }

    /// Distinct communities adjacent to `v` in direction `dir`.
    pub fn neigh_comms(&mut self, v: usize, dir: Direction) -> &[usize] {
        self.neighbor_weights(v, dir).communities()
    }

    /// Total weight of edges from `v` into `comm`.
    pub fn weight_to_comm(&mut self, v: usize, comm: usize) -> f64 {
        self.neighbor_weights(v, Direction::Out).weight(comm)
    }

    /// Total weight of edges from `comm` into `v`.
    pub fn weight_from_comm(&mut self, v: usize, comm: usize) -> f64 {
        self.neighbor_weights(v, Direction::In).weight(comm)
    }

    /// Total weight of edges between `v` and `comm` in either direction.
    pub fn weight_all_comm(&mut self, v: usize, comm: usize) -> f64 {
        self.neighbor_weights(v, Direction::All).weight(comm)
    }

    /// Communities of `v`'s neighbors that share `v`'s group in
    /// `constraint` (uncached).
    ///
    /// Used to restrict candidate moves to a coarser reference grouping.
    pub fn constrained_neigh_comms(
        &self,
        v: usize,
        dir: Direction,
        constraint: &[usize],
    ) -> Result<hashbrown::HashSet<usize>> {
        let n = self.graph.node_count();
        if constraint.len() != n {
            return Err(PartitionError::LengthMismatch {
                what: "constraint membership",
                expected: n,
                found: constraint.len(),
            });
        }
        let group = constraint[v];
        Ok(self
            .graph
            .neighbors(v, dir)
            .iter()
            .filter(|&&u| constraint[u] == group)
            .map(|&u| self.registry.community_of(u))
            .collect())
    }

    // ---------------------------------------------------------------------
    // accessors
    // ---------------------------------------------------------------------

    /// The graph this partition is defined on.
    #[inline]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Give up the partition and hand back its graph.
    pub fn into_graph(self) -> G {
        self.graph
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Community of every node.
    #[inline]
    pub fn membership(&self) -> &[usize] {
        self.registry.membership()
    }

    /// Community of node `v`.
    #[inline]
    pub fn community_of(&self, v: usize) -> usize {
        self.registry.community_of(v)
    }

    /// Number of community ids, empty ones included.
    #[inline]
    pub fn community_count(&self) -> usize {
        self.registry.community_count()
    }

    /// Nodes in `comm` (unordered; empty for unknown ids).
    #[inline]
    pub fn community(&self, comm: usize) -> &[usize] {
        self.registry.members(comm)
    }

    /// Total node size of `comm` (0 for unknown ids).
    #[inline]
    pub fn csize(&self, comm: usize) -> usize {
        self.aggregates.csize(comm)
    }

    /// Internal edge weight of `comm`.
    #[inline]
    pub fn total_weight_in_comm(&self, comm: usize) -> f64 {
        self.aggregates.weight_in(comm)
    }

    /// Weight of edges leaving the members of `comm`.
    #[inline]
    pub fn total_weight_from_comm(&self, comm: usize) -> f64 {
        self.aggregates.weight_from(comm)
    }

    /// Weight of edges entering the members of `comm`.
    #[inline]
    pub fn total_weight_to_comm(&self, comm: usize) -> f64 {
        self.aggregates.weight_to(comm)
    }

    /// Internal weight summed over all communities.
    #[inline]
    pub fn total_weight_in_all_comms(&self) -> f64 {
        self.aggregates.total_weight_in()
    }

    /// Possible edges summed over all communities.
    #[inline]
    pub fn total_possible_edges_in_all_comms(&self) -> f64 {
        self.aggregates.total_possible_edges()
    }

    /// All per-community totals.
    #[inline]
    pub fn aggregates(&self) -> &CommunityAggregates {
        &self.aggregates
    }

    /// Ids in the empty pool; the last one is reused first.
    #[inline]
    pub fn empty_communities(&self) -> &[usize] {
        self.registry.empty_pool()
    }

    /// Node whose neighbor weights are cached for `dir`, if any.
    #[inline]
    pub fn cached_node(&self, dir: Direction) -> Option<usize> {
        self.cache.cached_node(dir)
    }
}

/// Check that `membership` covers `node_count` nodes with ids below it.
pub(crate) fn validate_membership(node_count: usize, membership: &[usize]) -> Result<()> {
    if membership.len() != node_count {
        return Err(PartitionError::LengthMismatch {
            what: "membership",
            expected: node_count,
            found: membership.len(),
        });
    }
    match membership.iter().find(|&&c| c >= node_count) {
        Some(&community) => Err(PartitionError::CommunityOutOfRange {
            community,
            limit: node_count,
        }),
        None => Ok(()),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= WEIGHT_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

impl<G: CommunityGraph> DebugInvariants for MutableVertexPartition<G> {
    fn debug_assert_invariants(&self) {
        debug_invariants!(self.validate_invariants(), "MutableVertexPartition");
    }

    fn validate_invariants(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> {
            log::warn!("partition invariant failed: {msg}");
            Err(PartitionError::InvariantViolation(msg))
        };
        let n = self.graph.node_count();
        let count = self.registry.community_count();
        if self.aggregates.community_count() != count {
            return fail(format!(
                "{} aggregate slots for {count} communities",
                self.aggregates.community_count()
            ));
        }

        let mut seen = 0usize;
        for c in 0..count {
            let members = self.registry.members(c);
            seen += members.len();
            if let Some(&v) = members.iter().find(|&&v| self.registry.community_of(v) != c) {
                return fail(format!("node {v} listed in community {c} but belongs to {}", self.registry.community_of(v)));
            }
            let size: usize = members.iter().map(|&v| self.graph.node_size(v)).sum();
            if size != self.aggregates.csize(c) {
                return fail(format!("community {c} has size {size}, recorded {}", self.aggregates.csize(c)));
            }
            let pooled = self.registry.empty_pool().iter().filter(|&&e| e == c).count();
            let expected = usize::from(members.is_empty());
            if pooled != expected {
                return fail(format!("community {c} with {} members pooled {pooled} times", members.len()));
            }
        }
        if seen != n {
            return fail(format!("{seen} registered members for {n} nodes"));
        }
        if let Some(&c) = self.registry.empty_pool().iter().find(|&&c| c >= count) {
            return fail(format!("pooled community {c} does not exist"));
        }

        let weight_in: f64 = (0..count).map(|c| self.aggregates.weight_in(c)).sum();
        if !close(weight_in, self.aggregates.total_weight_in()) {
            return fail(format!(
                "internal weights sum to {weight_in}, total is {}",
                self.aggregates.total_weight_in()
            ));
        }
        let possible: f64 = (0..count)
            .map(|c| self.graph.possible_edges(self.aggregates.csize(c)))
            .sum();
        if !close(possible, self.aggregates.total_possible_edges()) {
            return fail(format!(
                "possible edges sum to {possible}, total is {}",
                self.aggregates.total_possible_edges()
            ));
        }
        Ok(())
    }
}
