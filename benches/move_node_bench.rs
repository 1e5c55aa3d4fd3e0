use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use community_partition::prelude::*;

// Synthetic Erdos-Renyi graph
fn random_graph(n: usize, avg_degree: f64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let m = (n as f64 * avg_degree / 2.0) as usize;
    let edges: Vec<(usize, usize, f64)> = (0..m)
        .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n), rng.r#gen::<f64>() + 0.5))
        .collect();
    Graph::from_edges(n, &edges, GraphConfig::undirected()).unwrap()
}

fn bench_move_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_node");
    for &n in &[1_000, 10_000, 100_000] {
        let graph = random_graph(n, 10.0, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            let mut p = MutableVertexPartition::new(g);
            let mut rng = SmallRng::seed_from_u64(7);
            b.iter(|| {
                let v = rng.gen_range(0..n);
                let u = rng.gen_range(0..n);
                let target = p.community_of(u);
                p.move_node(black_box(v), black_box(target));
            });
        });
    }
    group.finish();
}

fn bench_neighbor_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_weights");
    for &n in &[1_000, 100_000] {
        let graph = random_graph(n, 10.0, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            let membership = (0..n).map(|v| v % 64).collect();
            let mut p = MutableVertexPartition::with_membership(g, membership).unwrap();
            let mut v = 0;
            b.iter(|| {
                v = (v + 1) % n;
                black_box(p.neighbor_weights(v, Direction::All).len())
            });
        });
    }
    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let graph = random_graph(100_000, 10.0, 42);
    let membership: Vec<usize> = (0..graph.node_count()).map(|v| v % 1_000).collect();
    let mut p = MutableVertexPartition::new(&graph);
    c.bench_function("rebuild_100k", |b| {
        b.iter(|| p.set_membership(black_box(membership.clone())).unwrap())
    });
}

criterion_group!(benches, bench_move_node, bench_neighbor_weights, bench_rebuild);
criterion_main!(benches);
