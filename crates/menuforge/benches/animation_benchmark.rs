//! Animation scheduling benchmarks: interval reduction and the per-tick
//! counter loop driving a multi-animation menu.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use menuforge::{interval, FnAnimation, MenuBuilder, MenuRegistry};
use menuforge_host::{MockHost, MockScheduler, ViewerId};

fn bench_interval_reduction(c: &mut Criterion) {
    let intervals: Vec<u64> = (1..=32).map(|i| i * 20).collect();

    c.bench_function("gcd_all_32_intervals", |b| {
        b.iter(|| interval::gcd_all(black_box(intervals.iter().copied())));
    });

    c.bench_function("reduced_interval_32_intervals", |b| {
        b.iter(|| interval::reduced_interval(black_box(intervals.iter().copied())));
    });
}

fn bench_animation_ticks(c: &mut Criterion) {
    let mut builder = MenuBuilder::new("Bench").size(54).unwrap();
    for i in 0..8u64 {
        builder = builder.animation(Arc::new(FnAnimation::new(
            10 + i * 5,
            |_viewer, _menu, _host| {},
        )));
    }
    let menu = builder.build().unwrap().into_shared();

    c.bench_function("advance_1000_ticks_8_animations", |b| {
        b.iter_batched(
            || {
                let mut registry = MenuRegistry::new();
                let mut host = MockHost::new();
                let mut scheduler = MockScheduler::new();
                registry
                    .open(ViewerId::new(1), Arc::clone(&menu), &mut host, &mut scheduler)
                    .unwrap();
                (host, scheduler)
            },
            |(mut host, mut scheduler)| {
                scheduler.advance(black_box(1000), &mut host);
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_interval_reduction, bench_animation_ticks);
criterion_main!(benches);
