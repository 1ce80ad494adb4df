use criterion::{Criterion, criterion_group, criterion_main};
use rangekit_stats::Sketch;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sketch");
    group.bench_function("profile_scope", |b| {
        let sketch = Sketch::default();
        b.iter(|| {
            rangekit_stats::profile_scope!(&sketch);
        })
    });
    group.bench_function("summary", |b| {
        let sketch = Sketch::default();
        for i in 0..10_000 {
            sketch.add(i as f64);
        }
        b.iter(|| sketch.summary())
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
