use std::hint::black_box;

use bugfield_core::*;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn bench_initialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("initialize");
    for (name, config) in [
        ("welcome", GameConfig::WELCOME),
        ("expert", GameConfig::new(30, 180).unwrap()),
        ("dense", GameConfig::new(16, 200).unwrap()),
    ] {
        let mut rng = SeededSource::new(42);
        group.bench_function(name, |b| {
            b.iter(|| Board::initialize(black_box(config), &mut rng).unwrap())
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for side in [8, 64, Coord::MAX] {
        let layout = MineLayout::from_mine_indices(side, &[0]).unwrap();
        let last = square(side) - 1;
        group.bench_function(format!("{side}x{side}"), |b| {
            b.iter_batched(
                || Board::new(layout.clone()),
                |mut board| board.reveal(black_box(last)).unwrap(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_initialize, bench_flood_fill);
criterion_main!(benches);
