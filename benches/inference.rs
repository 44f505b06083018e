use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use labyrinth::{
    BayesianConfig, BeliefGrid, Coord, Knowledge, LogicalAgent, LogicalConfig, LogicalPercept,
    SearchEngine,
};

fn bench_axiom_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("axioms");
    for size in [4usize, 6] {
        group.bench_function(format!("encode_{size}x{size}"), |b| {
            b.iter(|| LogicalAgent::new(LogicalConfig::with_size(black_box(size))).unwrap());
        });
    }
    group.finish();
}

fn bench_process_percept(c: &mut Criterion) {
    let mut group = c.benchmark_group("logical");
    group.throughput(Throughput::Elements(1));

    group.bench_function("process_percept_6x6_start", |b| {
        b.iter_custom(|iters| {
            // Fresh agent per sample; repeated percepts are deduplicated, so
            // later iterations measure the query pass alone.
            let mut agent = LogicalAgent::new(LogicalConfig::default()).unwrap();
            let start = Coord::origin();
            let percept = LogicalPercept::default();

            let begin = Instant::now();
            for _ in 0..iters {
                let out = agent
                    .process_percept(&percept, start, &[start], false, false)
                    .unwrap();
                black_box(out);
            }
            begin.elapsed()
        })
    });
    group.finish();
}

fn bench_belief_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("bayesian");
    group.throughput(Throughput::Elements(1));

    group.bench_function("update_6x6", |b| {
        let mut grid = BeliefGrid::new(BayesianConfig::default()).unwrap();
        let pos = Coord::new(2, 3);
        b.iter(|| {
            grid.update(black_box([false, true, false, false, false]), pos)
                .unwrap();
        });
    });
    group.finish();
}

fn bench_planner(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    group.bench_function("plan_across_6x6", |b| {
        // Walked the first five rows; target the far corner of the last row.
        let visited: Vec<Coord> = (0..5)
            .flat_map(|r| (0..6).map(move |c| Coord::new(r, c)))
            .collect();
        let pos = Coord::new(0, 0);
        let frontier: Vec<Coord> = (0..6).rev().map(|c| Coord::new(5, c)).collect();
        let safe = [Coord::new(5, 5)];

        b.iter(|| {
            let mut engine = SearchEngine::with_frontier(6, &frontier).unwrap();
            engine
                .plan_next_move(Knowledge::Safe(black_box(&safe)), pos, &visited)
                .unwrap()
        });
    });
    group.finish();
}

criterion_group!(
    inference,
    bench_axiom_encoding,
    bench_process_percept,
    bench_belief_update,
    bench_planner
);
criterion_main!(inference);
