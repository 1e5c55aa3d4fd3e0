//! Community registry: member sets addressed by dense community id.

/// Membership of every node plus the member list of every community, with
/// O(1) moves and a stack of reusable empty community ids.
///
/// Member lists are unordered; removal swaps the last member into the hole.
#[derive(Debug, Clone, Default)]
pub(crate) struct CommunityRegistry {
    members: Vec<Vec<usize>>, // members[c] = nodes currently in community c
    membership: Vec<usize>,   // membership[v] = c when v is in members[c]
    position: Vec<usize>,     // position[v] = i when members[c][i] is v
    empty: Vec<usize>,        // stack of community ids with csize 0
}

impl CommunityRegistry {
    /// Rebuild from a complete membership vector.
    ///
    /// The community count becomes `max(membership) + 1`. The empty pool is
    /// cleared; the caller refills it once community sizes are known.
    pub(crate) fn rebuild(&mut self, membership: Vec<usize>) {
        let count = membership.iter().max().map_or(0, |&c| c + 1);
        self.members.clear();
        self.members.resize_with(count, Vec::new);
        self.position.clear();
        self.position.resize(membership.len(), 0);
        for (v, &c) in membership.iter().enumerate() {
            self.position[v] = self.members[c].len();
            self.members[c].push(v);
        }
        self.membership = membership;
        self.empty.clear();
    }

    /// Number of community ids, empty ones included.
    #[inline]
    pub(crate) fn community_count(&self) -> usize {
        self.members.len()
    }

    /// Community of `v`.
    #[inline]
    pub(crate) fn community_of(&self, v: usize) -> usize {
        self.membership[v]
    }

    /// Membership of every node.
    #[inline]
    pub(crate) fn membership(&self) -> &[usize] {
        &self.membership
    }

    /// Members of `comm`, empty for unknown ids.
    #[inline]
    pub(crate) fn members(&self, comm: usize) -> &[usize] {
        self.members.get(comm).map_or(&[][..], Vec::as_slice)
    }

    /// Move `v` into `comm`.
    pub(crate) fn move_to(&mut self, v: usize, comm: usize) {
        debug_assert!(comm < self.members.len(), "community out of range");
        let (prev, pos) = (self.membership[v], self.position[v]);
        if prev == comm {
            return;
        }

        let prev_members = &mut self.members[prev];
        prev_members.swap_remove(pos);
        if let Some(&moved) = prev_members.get(pos) {
            self.position[moved] = pos;
        }

        self.membership[v] = comm;
        self.position[v] = self.members[comm].len();
        self.members[comm].push(v);
    }

    /// Append a new community id with no members.
    pub(crate) fn push_community(&mut self) -> usize {
        self.members.push(Vec::new());
        self.members.len() - 1
    }

    /// Ids currently in the empty pool, oldest first.
    #[inline]
    pub(crate) fn empty_pool(&self) -> &[usize] {
        &self.empty
    }

    /// Most recently pooled empty id.
    #[inline]
    pub(crate) fn peek_empty(&self) -> Option<usize> {
        self.empty.last().copied()
    }

    /// Push `comm` onto the empty pool.
    #[inline]
    pub(crate) fn push_empty(&mut self, comm: usize) {
        self.empty.push(comm);
    }

    /// Take `comm` out of the empty pool, searching from the top.
    ///
    /// Returns whether it was pooled.
    pub(crate) fn take_empty(&mut self, comm: usize) -> bool {
        match self.empty.iter().rposition(|&c| c == comm) {
            Some(idx) => {
                self.empty.remove(idx);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(membership: &[usize]) -> CommunityRegistry {
        let mut reg = CommunityRegistry::default();
        reg.rebuild(membership.to_vec());
        reg
    }

    #[test]
    fn rebuild_groups_members() {
        let reg = registry(&[0, 1, 2, 0, 2, 1]);
        assert_eq!(reg.community_count(), 3);
        assert_eq!(reg.members(0), &[0, 3]);
        assert_eq!(reg.members(1), &[1, 5]);
        assert_eq!(reg.members(2), &[2, 4]);
        assert!(reg.members(7).is_empty());
        for (v, &c) in [0, 1, 2, 0, 2, 1].iter().enumerate() {
            assert_eq!(reg.community_of(v), c);
        }
    }

    #[test]
    fn rebuild_counts_gaps_as_communities() {
        let reg = registry(&[3, 0]);
        assert_eq!(reg.community_count(), 4);
        assert!(reg.members(1).is_empty());
        assert!(reg.members(2).is_empty());
    }

    #[test]
    fn rebuild_of_empty_membership() {
        let reg = registry(&[]);
        assert_eq!(reg.community_count(), 0);
        assert!(reg.membership().is_empty());
    }

    #[test]
    fn move_to_updates_swapped_member_position() {
        let mut reg = registry(&[0, 0, 0, 1, 0]);
        reg.move_to(1, 1);
        assert_eq!(reg.community_of(1), 1);
        assert!(!reg.members(0).contains(&1));
        // node 4 was swapped into node 1's slot; moving it must still work
        reg.move_to(4, 1);
        let mut left = reg.members(0).to_vec();
        left.sort_unstable();
        assert_eq!(left, vec![0, 2]);
        let mut right = reg.members(1).to_vec();
        right.sort_unstable();
        assert_eq!(right, vec![1, 3, 4]);
    }

    #[test]
    fn move_to_same_community_is_noop() {
        let mut reg = registry(&[0, 1]);
        reg.move_to(1, 1);
        assert_eq!(reg.members(1), &[1]);
        assert_eq!(reg.members(0), &[0]);
    }

    #[test]
    fn multiple_moves_keep_partition() {
        let mut reg = registry(&[0, 1, 2, 3, 4, 5]);
        for (v, c) in [(0, 1), (1, 2), (2, 1), (3, 2), (4, 1), (5, 2), (1, 0)] {
            reg.move_to(v, c);
        }
        let mut all: Vec<_> = (0..reg.community_count())
            .flat_map(|c| reg.members(c).iter().copied())
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
        for v in 0..6 {
            assert!(reg.members(reg.community_of(v)).contains(&v));
        }
    }

    #[test]
    fn empty_pool_is_a_stack() {
        let mut reg = registry(&[0]);
        let a = reg.push_community();
        let b = reg.push_community();
        reg.push_empty(a);
        reg.push_empty(b);
        assert_eq!(reg.peek_empty(), Some(b));
        assert!(reg.take_empty(a));
        assert_eq!(reg.empty_pool(), &[b]);
        assert!(!reg.take_empty(a));
        assert!(reg.take_empty(b));
        assert_eq!(reg.peek_empty(), None);
    }
}
