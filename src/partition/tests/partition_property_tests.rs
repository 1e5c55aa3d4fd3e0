use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::debug_invariants::DebugInvariants;
use crate::graph::{CommunityGraph, Direction, Graph, GraphConfig};
use crate::partition::MutableVertexPartition;

const TOL: f64 = 1e-9;

#[derive(Debug, Clone)]
struct Case {
    n: usize,
    directed: bool,
    correct_self_loops: bool,
    edge_prob: f64,
}

impl Case {
    fn seed(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.n.hash(&mut h);
        self.directed.hash(&mut h);
        self.correct_self_loops.hash(&mut h);
        self.edge_prob.to_bits().hash(&mut h);
        h.finish()
    }

    /// Random weighted graph with self-loops, parallel edges and node sizes.
    fn graph(&self, rng: &mut SmallRng) -> Graph {
        let mut edges = Vec::new();
        for u in 0..self.n {
            for v in 0..self.n {
                if !self.directed && v < u {
                    continue;
                }
                if rng.r#gen::<f64>() < self.edge_prob {
                    edges.push((u, v, rng.gen_range(0.25..4.0)));
                }
            }
        }
        // a few parallel edges
        for _ in 0..self.n / 3 {
            let (u, v) = (rng.gen_range(0..self.n), rng.gen_range(0..self.n));
            edges.push((u, v, rng.gen_range(0.25..4.0)));
        }
        let sizes = (0..self.n).map(|_| rng.gen_range(1..4)).collect();
        let config = GraphConfig {
            directed: self.directed,
            correct_self_loops: self.correct_self_loops,
        };
        Graph::from_edges(self.n, &edges, config)
            .unwrap()
            .with_node_sizes(sizes)
            .unwrap()
    }
}

fn assert_consistent<G: CommunityGraph + Clone>(p: &MutableVertexPartition<G>) -> Result<(), TestCaseError> {
    prop_assert!(p.validate_invariants().is_ok(), "{:?}", p.validate_invariants());
    let fresh = MutableVertexPartition::with_membership(p.graph().clone(), p.membership().to_vec())
        .unwrap();
    let diff = p.aggregates().max_abs_diff(fresh.aggregates());
    prop_assert!(diff < TOL, "incremental aggregates drifted by {}", diff);
    Ok(())
}

/// Move random nodes into random communities, including fresh empty ones.
fn shuffle<G: CommunityGraph>(p: &mut MutableVertexPartition<G>, rng: &mut SmallRng, moves: usize) {
    let n = p.node_count();
    for _ in 0..moves {
        let v = rng.gen_range(0..n);
        let target = if rng.gen_bool(0.2) {
            p.get_empty_community().unwrap_or_else(|_| p.community_of(v))
        } else {
            rng.gen_range(0..p.community_count())
        };
        p.move_node(v, target);
    }
}

/// Neighbor-community weights of `v` computed straight from the graph.
fn brute_force_weights<G: CommunityGraph>(
    p: &MutableVertexPartition<G>,
    v: usize,
    dir: Direction,
) -> Vec<f64> {
    let g = p.graph();
    let mut weights = vec![0.0; g.node_count()];
    for (u, w) in g.weighted_neighbors(v, dir) {
        let w = if u == v && !g.is_directed() { w / 2.0 } else { w };
        weights[p.community_of(u)] += w;
    }
    weights
}

/// Whether two memberships group the nodes the same way.
fn same_grouping(a: &[usize], b: &[usize]) -> bool {
    a.len() == b.len()
        && (0..a.len()).all(|i| (0..a.len()).all(|j| (a[i] == a[j]) == (b[i] == b[j])))
}

fn cases() -> impl Strategy<Value = Case> {
    (1usize..12, any::<bool>(), any::<bool>(), 0.05f64..0.6).prop_map(
        |(n, directed, correct_self_loops, edge_prob)| Case {
            n,
            directed,
            correct_self_loops,
            edge_prob,
        },
    )
}

proptest! {
    #[test]
    fn prop_moves_match_rebuild(case in cases(), moves in 0usize..80) {
        let mut rng = SmallRng::seed_from_u64(case.seed());
        let g = case.graph(&mut rng);
        let membership = (0..case.n).map(|_| rng.gen_range(0..case.n)).collect();
        let mut p = MutableVertexPartition::with_membership(&g, membership).unwrap();
        assert_consistent(&p)?;

        for _ in 0..moves {
            shuffle(&mut p, &mut rng, 1);
            // pool holds exactly the ids without members
            for c in 0..p.community_count() {
                let pooled = p.empty_communities().iter().filter(|&&e| e == c).count();
                prop_assert_eq!(pooled, usize::from(p.community(c).is_empty()));
            }
        }
        assert_consistent(&p)?;
        let total: usize = (0..p.community_count()).map(|c| p.csize(c)).sum();
        prop_assert_eq!(total, g.total_size());
    }

    #[test]
    fn prop_neighbor_weights_match_graph(case in cases(), moves in 0usize..30) {
        let mut rng = SmallRng::seed_from_u64(case.seed());
        let g = case.graph(&mut rng);
        let mut p = MutableVertexPartition::new(&g);
        shuffle(&mut p, &mut rng, moves);

        for v in 0..case.n {
            for dir in [Direction::Out, Direction::In, Direction::All] {
                let expected = brute_force_weights(&p, v, dir);
                let view = p.neighbor_weights(v, dir);
                let mut listed = view.communities().to_vec();
                for (c, &w) in expected.iter().enumerate() {
                    prop_assert!((view.weight(c) - w).abs() < TOL);
                    prop_assert_eq!(listed.contains(&c), w != 0.0);
                }
                listed.sort_unstable();
                listed.dedup();
                prop_assert_eq!(listed.len(), view.len());
            }
        }
    }

    #[test]
    fn prop_renumber_is_canonical(case in cases(), moves in 0usize..40) {
        let mut rng = SmallRng::seed_from_u64(case.seed());
        let g = case.graph(&mut rng);
        let mut p = MutableVertexPartition::new(&g);
        shuffle(&mut p, &mut rng, moves);
        let before = p.membership().to_vec();

        p.renumber_communities();
        prop_assert!(same_grouping(&before, p.membership()));
        prop_assert!(p.empty_communities().is_empty());
        let sizes: Vec<usize> = (0..p.community_count()).map(|c| p.csize(c)).collect();
        prop_assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "sizes {:?}", sizes);
        assert_consistent(&p)?;

        let once = p.membership().to_vec();
        p.renumber_communities();
        prop_assert_eq!(p.membership(), &once[..]);
    }

    #[test]
    fn prop_collapse_preserves_aggregates(case in cases(), moves in 0usize..40, coarse_moves in 0usize..20) {
        let mut rng = SmallRng::seed_from_u64(case.seed());
        let g = case.graph(&mut rng);
        let mut fine = MutableVertexPartition::new(&g);
        shuffle(&mut fine, &mut rng, moves);

        let coarse_graph = fine.collapse_graph().unwrap();
        let mut coarse = MutableVertexPartition::new(&coarse_graph);
        let diff = fine.aggregates().max_abs_diff(coarse.aggregates());
        prop_assert!(diff < TOL, "collapsed aggregates differ by {}", diff);

        // moves on the coarse level carry over to the fine level
        shuffle(&mut coarse, &mut rng, coarse_moves);
        fine.from_coarser_partition(&coarse).unwrap();
        let diff = fine.aggregates().max_abs_diff(coarse.aggregates());
        prop_assert!(diff < TOL, "projected aggregates differ by {}", diff);
        assert_consistent(&fine)?;
    }
}
