//! Per-community totals and the two global scalars quality functions need.

/// Aggregate statistics of every community id.
///
/// Indexed by community id; unknown ids read as zero. `weight_from` and
/// `weight_to` include internal edges, so both are at least `weight_in` for
/// non-negative edge weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityAggregates {
    csize: Vec<usize>,
    weight_in: Vec<f64>,
    weight_from: Vec<f64>,
    weight_to: Vec<f64>,
    total_weight_in: f64,
    total_possible_edges: f64,
}

impl CommunityAggregates {
    /// Zero everything and size for `count` communities.
    pub(crate) fn reset(&mut self, count: usize) {
        for v in [&mut self.weight_in, &mut self.weight_from, &mut self.weight_to] {
            v.clear();
            v.resize(count, 0.0);
        }
        self.csize.clear();
        self.csize.resize(count, 0);
        self.total_weight_in = 0.0;
        self.total_possible_edges = 0.0;
    }

    /// Append zeroed totals for a new community id.
    pub(crate) fn push_community(&mut self) {
        self.csize.push(0);
        self.weight_in.push(0.0);
        self.weight_from.push(0.0);
        self.weight_to.push(0.0);
    }

    /// Number of community ids tracked.
    #[inline]
    pub fn community_count(&self) -> usize {
        self.csize.len()
    }

    /// Total node size of `comm`.
    #[inline]
    pub fn csize(&self, comm: usize) -> usize {
        self.csize.get(comm).copied().unwrap_or(0)
    }

    /// Internal edge weight of `comm`.
    #[inline]
    pub fn weight_in(&self, comm: usize) -> f64 {
        self.weight_in.get(comm).copied().unwrap_or(0.0)
    }

    /// Weight of edges leaving members of `comm`.
    #[inline]
    pub fn weight_from(&self, comm: usize) -> f64 {
        self.weight_from.get(comm).copied().unwrap_or(0.0)
    }

    /// Weight of edges entering members of `comm`.
    #[inline]
    pub fn weight_to(&self, comm: usize) -> f64 {
        self.weight_to.get(comm).copied().unwrap_or(0.0)
    }

    /// Sum of internal weight over all communities.
    #[inline]
    pub fn total_weight_in(&self) -> f64 {
        self.total_weight_in
    }

    /// Sum over communities of the graph's possible-edge count for their size.
    #[inline]
    pub fn total_possible_edges(&self) -> f64 {
        self.total_possible_edges
    }

    /// All community sizes.
    #[inline]
    pub fn csizes(&self) -> &[usize] {
        &self.csize
    }

    /// Largest absolute difference to `other` over every total; ids missing
    /// on one side read as zero.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        let count = self.community_count().max(other.community_count());
        (0..count)
            .flat_map(|c| {
                [
                    self.csize(c) as f64 - other.csize(c) as f64,
                    self.weight_in(c) - other.weight_in(c),
                    self.weight_from(c) - other.weight_from(c),
                    self.weight_to(c) - other.weight_to(c),
                ]
            })
            .chain([
                self.total_weight_in - other.total_weight_in,
                self.total_possible_edges - other.total_possible_edges,
            ])
            .fold(0.0, |acc: f64, d| acc.max(d.abs()))
    }

    #[inline]
    pub(crate) fn add_size(&mut self, comm: usize, size: usize) {
        self.csize[comm] += size;
    }

    #[inline]
    pub(crate) fn remove_size(&mut self, comm: usize, size: usize) {
        self.csize[comm] -= size;
    }

    #[inline]
    pub(crate) fn add_internal(&mut self, comm: usize, w: f64) {
        self.weight_in[comm] += w;
        self.total_weight_in += w;
    }

    #[inline]
    pub(crate) fn remove_internal(&mut self, comm: usize, w: f64) {
        self.weight_in[comm] -= w;
        self.total_weight_in -= w;
    }

    #[inline]
    pub(crate) fn add_from(&mut self, comm: usize, w: f64) {
        self.weight_from[comm] += w;
    }

    #[inline]
    pub(crate) fn add_to(&mut self, comm: usize, w: f64) {
        self.weight_to[comm] += w;
    }

    /// Move one edge end's outgoing weight between communities.
    #[inline]
    pub(crate) fn shift_from(&mut self, old: usize, new: usize, w: f64) {
        self.weight_from[old] -= w;
        self.weight_from[new] += w;
    }

    /// Move one edge end's incoming weight between communities.
    #[inline]
    pub(crate) fn shift_to(&mut self, old: usize, new: usize, w: f64) {
        self.weight_to[old] -= w;
        self.weight_to[new] += w;
    }

    #[inline]
    pub(crate) fn add_possible_edges(&mut self, delta: f64) {
        self.total_possible_edges += delta;
    }
}
