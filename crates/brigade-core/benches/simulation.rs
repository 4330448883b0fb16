use brigade_core::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn running_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::with_seed(GameConfig::default(), seed);
    let _ = engine.start_day();
    engine
}

fn bench_advance(c: &mut Criterion) {
    c.bench_function("advance one service day", |b| {
        b.iter(|| {
            let mut engine = running_engine(black_box(7));
            let day = engine.config().economy.day_duration;
            engine.advance_by(day)
        })
    });

    c.bench_function("advance a busy kitchen 100 ticks", |b| {
        b.iter_batched(
            || {
                let mut engine = running_engine(11);
                engine.advance_by(120);
                engine
            },
            |mut engine| {
                for order in engine.orders() {
                    let _ = engine.assign(order.id);
                }
                engine.advance_by(black_box(100))
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = running_engine(3);
    engine.advance_by(150);
    c.bench_function("snapshot to json", |b| {
        b.iter(|| engine.snapshot().to_json().map(|s| s.len()))
    });
}

criterion_group!(benches, bench_advance, bench_snapshot);
criterion_main!(benches);
