use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ndarray::prelude::*;
use ndarray_pad::*;
use ndarray_rand::{rand_distr::Uniform, RandomExt};

fn criterion_benchmark(c: &mut Criterion) {
    let x = Array::random((4, 32, 256, 256), Uniform::new(0f32, 1.));
    let paddings = [[1, 1], [2, 2], [8, 8], [8, 8]];

    c.bench_function("constant", |b| {
        b.iter(|| x.pad(PadMode::Constant(0.0), black_box(paddings)))
    });

    c.bench_function("reflect", |b| {
        b.iter(|| x.pad(PadMode::Reflect, black_box(paddings)))
    });

    c.bench_function("symmetric", |b| {
        b.iter(|| x.pad(PadMode::Symmetric, black_box(paddings)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
