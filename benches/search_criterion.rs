use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cherry_reversi::game_state::board::Board;
use cherry_reversi::search::uct::{SearchLimits, UctTree, DEFAULT_EXPANSION_THRESHOLD};
use cherry_reversi::utils::xorshift::Xorshift;

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("uct_search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(20);

    for &iterations in &[1_000u64, 5_000, 20_000] {
        group.throughput(Throughput::Elements(iterations));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("startpos_{iterations}_iters")),
            &iterations,
            |b, &iterations| {
                let limits = SearchLimits {
                    max_iterations: iterations,
                    max_simulations: u32::MAX,
                    movetime: Duration::from_secs(3_600),
                };
                b.iter(|| {
                    let mut tree = UctTree::with_rng(
                        DEFAULT_EXPANSION_THRESHOLD,
                        200_000,
                        Xorshift::new(987),
                    );
                    tree.set_root(Board::new());
                    let result = tree.search(black_box(&limits));
                    assert_eq!(result.root.visits as u64, iterations);
                    black_box(result.root.value)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
