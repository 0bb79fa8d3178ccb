use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sapper_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        group.bench_function(difficulty.name(), |b| {
            let mut sampler = RandomMineSampler::new(0x5eed);
            b.iter(|| Board::generate(black_box(config), &mut sampler));
        });
    }
    group.finish();
}

fn bench_first_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_click");
    for difficulty in Difficulty::ALL {
        group.bench_function(difficulty.name(), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let mut session = Session::new(Scoreboard::default(), seed);
                session.set_difficulty(difficulty);
                black_box(session.click((0, 0)))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_first_click);
criterion_main!(benches);
