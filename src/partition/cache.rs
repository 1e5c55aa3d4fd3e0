//! Neighbor-community cache.
//!
//! Move evaluation asks, for one node at a time, how much edge weight
//! connects it to each neighboring community. Each direction keeps one dense
//! `community -> weight` array that is valid for the last node queried in
//! that direction. Switching to another node zeroes only the slots the
//! previous node touched, so a query costs O(degree) no matter how many
//! communities exist.

use crate::graph::{CommunityGraph, Direction};

/// Query-scoped cache for a single direction.
#[derive(Debug, Clone, Default)]
struct DirectionCache {
    node: Option<usize>,
    weights: Vec<f64>,
    seen: Vec<bool>,
    communities: Vec<usize>,
}

impl DirectionCache {
    fn reset(&mut self, capacity: usize) {
        self.node = None;
        self.weights.clear();
        self.weights.resize(capacity, 0.0);
        self.seen.clear();
        self.seen.resize(capacity, false);
        self.communities.clear();
    }

    /// Accumulate weight per neighbor community of `v`, unless `v` is cached.
    fn refresh<G: CommunityGraph>(&mut self, graph: &G, membership: &[usize], v: usize, dir: Direction) {
        if self.node == Some(v) {
            return;
        }

        for &comm in &self.communities {
            self.weights[comm] = 0.0;
        }
        self.communities.clear();

        let halve_loops = !graph.is_directed();
        for (u, w) in graph.weighted_neighbors(v, dir) {
            let comm = membership[u];
            // An undirected self-loop is listed once per end.
            let w = if u == v && halve_loops { w / 2.0 } else { w };
            self.weights[comm] += w;
            if !self.seen[comm] {
                self.seen[comm] = true;
                self.communities.push(comm);
            }
        }

        // Drop communities whose weight cancelled out; their slot is already 0.
        let (weights, seen) = (&self.weights, &mut self.seen);
        self.communities.retain(|&comm| {
            seen[comm] = false;
            weights[comm] != 0.0
        });
        self.node = Some(v);
    }

    #[inline]
    fn view(&self) -> NeighborWeights<'_> {
        NeighborWeights {
            communities: &self.communities,
            weights: &self.weights,
        }
    }
}

/// Weight between one node and each of its neighboring communities.
///
/// Borrowed from the partition for the duration of one query, so it cannot
/// outlive a subsequent mutation.
#[derive(Debug, Clone, Copy)]
pub struct NeighborWeights<'a> {
    communities: &'a [usize],
    weights: &'a [f64],
}

impl<'a> NeighborWeights<'a> {
    /// Distinct neighboring communities with non-zero weight, in first-seen
    /// order.
    #[inline]
    pub fn communities(&self) -> &'a [usize] {
        self.communities
    }

    /// Weight between the node and `comm` (0 when not adjacent).
    #[inline]
    pub fn weight(&self, comm: usize) -> f64 {
        self.weights.get(comm).copied().unwrap_or(0.0)
    }

    /// `(community, weight)` pairs for every neighboring community.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + 'a {
        let weights = self.weights;
        self.communities.iter().map(move |&c| (c, weights[c]))
    }

    /// Number of neighboring communities.
    #[inline]
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// Whether the node has no neighboring community.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }
}

/// The three per-direction caches of a partition.
#[derive(Debug, Clone, Default)]
pub(crate) struct NeighborCache {
    out: DirectionCache,
    inc: DirectionCache,
    all: DirectionCache,
}

impl NeighborCache {
    /// Drop all cached state; `capacity` bounds community ids (the node count).
    pub(crate) fn reset(&mut self, capacity: usize) {
        self.out.reset(capacity);
        self.inc.reset(capacity);
        self.all.reset(capacity);
    }

    /// Forget which nodes are cached. Touched slots are zeroed lazily on the
    /// next query.
    #[inline]
    pub(crate) fn invalidate(&mut self) {
        self.out.node = None;
        self.inc.node = None;
        self.all.node = None;
    }

    /// Node currently cached for `dir`.
    #[inline]
    pub(crate) fn cached_node(&self, dir: Direction) -> Option<usize> {
        self.slot(dir).node
    }

    pub(crate) fn query<G: CommunityGraph>(
        &mut self,
        graph: &G,
        membership: &[usize],
        v: usize,
        dir: Direction,
    ) -> NeighborWeights<'_> {
        let slot = self.slot_mut(dir);
        slot.refresh(graph, membership, v, dir);
        slot.view()
    }

    #[inline]
    fn slot(&self, dir: Direction) -> &DirectionCache {
        match dir {
            Direction::Out => &self.out,
            Direction::In => &self.inc,
            Direction::All => &self.all,
        }
    }

    #[inline]
    fn slot_mut(&mut self, dir: Direction) -> &mut DirectionCache {
        match dir {
            Direction::Out => &mut self.out,
            Direction::In => &mut self.inc,
            Direction::All => &mut self.all,
        }
    }
}
