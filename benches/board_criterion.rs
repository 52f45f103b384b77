use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use cherry_reversi::game_state::board::Board;
use cherry_reversi::game_state::reversi_types::{Color, GameResult, Move, MAX_MOVE_NUM};
use cherry_reversi::move_generation::legal_mask::{calc_flip_mask, calc_legal_mask};
use cherry_reversi::utils::xorshift::Xorshift;

fn random_playout(seed: u32) -> u32 {
    let mut board = Board::new();
    let mut rng = Xorshift::new(seed);
    let mut buffer = [Move::pass(Color::Black); MAX_MOVE_NUM];
    while board.result(Color::Black) == GameResult::NotEnd {
        let count = board.next_moves(&mut buffer);
        board.update(buffer[rng.next_below(count as u32) as usize]);
    }
    board.disc_count(Color::Black)
}

fn bench_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("board");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));

    let board = Board::new();
    let (player, opponent) = (board.mask(Color::Black), board.mask(Color::White));

    // Correctness guard before benchmarking: four openings from the cross.
    assert_eq!(calc_legal_mask(player, opponent).count_ones(), 4);

    group.throughput(Throughput::Elements(1));
    group.bench_function("legal_mask_startpos", |b| {
        b.iter(|| calc_legal_mask(black_box(player), black_box(opponent)))
    });

    group.bench_function("flip_mask_d3", |b| {
        b.iter(|| calc_flip_mask(black_box(1u64 << 19), black_box(player), black_box(opponent)))
    });

    group.bench_function("move_enumeration_startpos", |b| {
        let mut buffer = [Move::pass(Color::Black); MAX_MOVE_NUM];
        b.iter(|| {
            let mut fresh = Board::new();
            black_box(fresh.next_moves(&mut buffer))
        })
    });

    group.bench_function("random_playout", |b| {
        let mut seed = 1u32;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(random_playout(seed))
        })
    });

    group.finish();
}

criterion_group!(board_benches, bench_board);
criterion_main!(board_benches);
