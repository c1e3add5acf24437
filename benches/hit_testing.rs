use criterion::{criterion_group, criterion_main, Criterion};
use egui::Pos2;
use egui_graph_gui::{geometry::DEFAULT_EDGE_THRESHOLD, Graph, Vertex};
use petgraph::stable_graph::NodeIndex;
use std::hint::black_box;
use std::time::Duration;

/// Grid of vertices, each row connected into a chain.
fn make_graph(rows: usize, cols: usize) -> Graph<usize, ()> {
    let mut g = Graph::new();
    let mut idxs: Vec<NodeIndex> = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let pos = Pos2::new(c as f32 * 40.0 + 20.0, r as f32 * 40.0 + 20.0);
            idxs.push(g.add_vertex(Vertex::new(pos, r * cols + c)));
        }
    }
    for r in 0..rows {
        for c in 1..cols {
            g.add_edge(idxs[r * cols + c - 1], idxs[r * cols + c], ());
        }
    }
    g
}

fn bench_hit_testing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_testing");
    group.sample_size(20);
    group.measurement_time(Duration::from_millis(600));
    group.warm_up_time(Duration::from_millis(200));

    let g = make_graph(50, 50);
    // last vertex in the order and a point between its row neighbours
    let last_vertex = Pos2::new(49.0 * 40.0 + 20.0, 49.0 * 40.0 + 20.0);
    let on_edge = Pos2::new(48.5 * 40.0 + 20.0, 49.0 * 40.0 + 20.0);
    let empty = Pos2::new(-100.0, -100.0);

    group.bench_function("vertex_hit_last", |b| {
        b.iter(|| black_box(g.vertex_at_point(black_box(last_vertex), None)));
    });
    group.bench_function("vertex_miss", |b| {
        b.iter(|| black_box(g.vertex_at_point(black_box(empty), None)));
    });
    group.bench_function("edge_hit_last", |b| {
        b.iter(|| {
            black_box(g.edge_at_point(black_box(on_edge), DEFAULT_EDGE_THRESHOLD, None))
        });
    });
    group.bench_function("edge_miss", |b| {
        b.iter(|| black_box(g.edge_at_point(black_box(empty), DEFAULT_EDGE_THRESHOLD, None)));
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().configure_from_args();
    targets = bench_hit_testing
}
criterion_main!(benches);
