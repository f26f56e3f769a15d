//! Benchmarks for the cochlear model run loop.

use core::f32::consts::PI;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use equiloud_carfac::CarfacContext;

fn bench_run(c: &mut Criterion) {
    let mut ctx = CarfacContext::create(48000).unwrap();
    let input: Vec<f32> = (0..ctx.num_samples())
        .map(|i| 0.1 * (2.0 * PI * 1000.0 * i as f32 / 48000.0).sin())
        .collect();

    c.bench_function("run_48k_window", |b| {
        b.iter(|| ctx.run(black_box(&input)).unwrap());
    });
}

fn bench_extract(c: &mut Criterion) {
    let mut ctx = CarfacContext::create(48000).unwrap();
    ctx.run(&vec![0.0f32; ctx.num_samples()]).unwrap();
    let mut out = vec![0.0f32; ctx.num_samples() * ctx.num_channels()];

    c.bench_function("nap_into_48k", |b| {
        b.iter(|| ctx.nap_into(black_box(&mut out)).unwrap());
    });
}

criterion_group!(benches, bench_run, bench_extract);
criterion_main!(benches);
