use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cantor::sets::{self, Set};

fn populated(offset: usize, len: usize) -> Set {
    (offset..offset + len).map(|n| format!("item{n}")).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let a = Set::new();
    let b = Set::new();
    c.bench_function("union 0", |bench| bench.iter(|| sets::union(black_box(&[&a, &b]))));

    for len in [1_000, 100_000] {
        let a = populated(0, len);
        let b = populated(len / 2, len);
        c.bench_function(&format!("union {len}"), |bench| {
            bench.iter(|| sets::union(black_box(&[&a, &b])))
        });
        c.bench_function(&format!("intersection {len}"), |bench| {
            bench.iter(|| sets::intersection(black_box(&[&a, &b])))
        });
        c.bench_function(&format!("difference {len}"), |bench| {
            bench.iter(|| sets::difference(black_box(&[&a, &b])))
        });
        c.bench_function(&format!("symmetric difference {len}"), |bench| {
            bench.iter(|| sets::symmetric_difference(black_box(&[&a, &b])))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
