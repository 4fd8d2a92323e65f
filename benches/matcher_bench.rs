use std::hint::black_box;

use chrono::{DateTime, Duration};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use trajmeet::{
    DelaunayGabriel, MatchThresholds, MatcherRegistry, PlanarPoint, ProximityGraph,
    SpacetimePoint,
};

/// Two parallel random walks on one floor, offset so that they seldom
/// meet and the strategies mostly run to completion.
fn walks(len: usize) -> (Vec<SpacetimePoint>, Vec<SpacetimePoint>) {
    let base = DateTime::parse_from_rfc3339("2017-07-18T09:00:00+03:00").unwrap();
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let mut step = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 1000) as f64 / 1000.0 - 0.5
    };

    let (mut one, mut two) = (Vec::with_capacity(len), Vec::with_capacity(len));
    let (mut x, mut y) = (0.0f64, 0.0f64);
    for i in 0..len {
        x += step();
        y += step();
        let t = base + Duration::seconds(i as i64 * 5);
        one.push(SpacetimePoint::new("one", t, x, y, 1));
        two.push(SpacetimePoint::new("two", t, x + 1.5, y + 1.5, 1));
    }
    (one, two)
}

/// Benchmark both strategies, sequential and parallel
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("identify");
    let thresholds = MatchThresholds::new(1.0, 30).unwrap();

    for len in [100usize, 1_000, 5_000] {
        let (one, two) = walks(len);
        group.throughput(Throughput::Elements((len * 2) as u64));

        for parallel in [false, true] {
            let registry = MatcherRegistry::with_parallel(parallel);
            for name in registry.available() {
                let matcher = registry.resolve(&name).unwrap();
                let id = format!("{name}{}", if parallel { "_par" } else { "" });
                group.bench_with_input(BenchmarkId::new(id, len), &len, |b, _| {
                    b.iter(|| {
                        matcher
                            .identify(Some(black_box(one.as_slice())), Some(black_box(two.as_slice())), &thresholds)
                            .unwrap()
                    })
                });
            }
        }
    }

    group.finish();
}

/// Benchmark Gabriel graph construction alone
fn bench_gabriel_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("gabriel_edges");

    for len in [1_000usize, 10_000] {
        let (one, _) = walks(len);
        let points: Vec<PlanarPoint> = one.iter().map(|p| PlanarPoint::new(p.x(), p.y())).collect();
        group.throughput(Throughput::Elements(len as u64));

        for parallel in [false, true] {
            let graph = DelaunayGabriel::new().with_parallel(parallel);
            let id = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(id, len), &points, |b, points| {
                b.iter(|| graph.gabriel_edges(black_box(points)).unwrap())
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_gabriel_graph);
criterion_main!(benches);
