use criterion::{Criterion, criterion_group, criterion_main};
use memora_core::{BoardGenerator, Difficulty, RandomBoardGenerator, Symbol};
use std::hint::black_box;

fn bench_board_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_gen");
    for difficulty in Difficulty::ALL {
        let pairs = difficulty.config().pair_count;
        group.bench_function(difficulty.name(), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                RandomBoardGenerator::new(black_box(seed))
                    .generate(pairs, &Symbol::POOL)
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_board_generation);
criterion_main!(benches);
