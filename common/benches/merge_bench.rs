use arcade_core::games::SessionRng;
use arcade_core::games::memory::{IconTheme, deal};
use arcade_core::games::puzzle2048::{Board, Direction, GameStatus, Puzzle2048GameState};
use criterion::{Criterion, SamplingMode, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

fn bench_slide_dense_board() {
    let mut board = Board::from_values([
        [2, 2, 4, 8],
        [16, 16, 0, 2],
        [0, 4, 4, 4],
        [8, 0, 8, 0],
    ]);
    for direction in Direction::ALL {
        black_box(board.slide(direction));
    }
}

fn bench_play_until_over() {
    let mut rng = SessionRng::new(2048);
    let mut state = Puzzle2048GameState::new(&mut rng);
    let mut step = 0;
    while state.status() == GameStatus::Playing && step < 10_000 {
        state.apply_move(Direction::ALL[step % 4], &mut rng);
        step += 1;
    }
    black_box(state.score());
}

fn bench_deal_largest_grid() {
    let icons: Vec<String> = IconTheme::Emojis
        .icons()
        .iter()
        .map(|icon| icon.to_string())
        .collect();
    let mut rng = SessionRng::new(36);
    black_box(deal(6, &icons, &mut rng).ok());
}

fn merge_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(50)
        .measurement_time(Duration::from_secs(10));

    group.bench_function("slide_dense_board", |b| {
        b.iter(bench_slide_dense_board)
    });

    group.bench_function("play_until_over", |b| {
        b.iter(bench_play_until_over)
    });

    group.bench_function("deal_6x6", |b| {
        b.iter(bench_deal_largest_grid)
    });

    group.finish();
}

criterion_group!(benches, merge_bench);
criterion_main!(benches);
