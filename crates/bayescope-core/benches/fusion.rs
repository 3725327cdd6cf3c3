use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bayescope_core::engine::{create_belief, update};
use bayescope_core::model::{Evidence, TestOutcome};

fn make_batch(n: usize) -> Vec<Evidence> {
    (0..n)
        .map(|i| {
            let outcome = if i % 3 == 0 {
                TestOutcome::Negative
            } else {
                TestOutcome::Positive
            };
            Evidence::new(0.9, 0.05 + (i as f64 % 10.0) * 0.01, outcome).unwrap()
        })
        .collect()
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    let single = make_batch(1);
    group.bench_function("single_test", |b| {
        b.iter(|| {
            let mut belief = create_belief(0.001).unwrap();
            update(&mut belief, black_box(&single)).unwrap()
        })
    });

    let batch = make_batch(32);
    group.bench_function("batch_32", |b| {
        b.iter(|| {
            let mut belief = create_belief(0.001).unwrap();
            update(&mut belief, black_box(&batch)).unwrap()
        })
    });

    let item = make_batch(1);
    group.bench_function("sequential_100_updates", |b| {
        b.iter(|| {
            let mut belief = create_belief(0.5).unwrap();
            for _ in 0..100 {
                update(&mut belief, black_box(&item)).unwrap();
            }
            belief.posterior()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
