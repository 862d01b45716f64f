//! Benchmark k-NN search against the linear baseline.

use core::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;

use atria::{BuildOptions, Euclidean, KnnOptions, MatrixSet, Tree};

fn knn_search(c: &mut Criterion) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let data = symagen::random_data::random_tabular_floats(10_000, 10, -1.0_f32, 1.0, &mut rng);
    let points = MatrixSet::from_rows(data).unwrap();
    let options = BuildOptions::default().with_seed(42);
    let tree = Tree::new(&points, Euclidean, &options).unwrap();

    let query = vec![0.0_f32; 10];
    let knn_options = KnnOptions::default();

    let mut group = c.benchmark_group("knn-search");
    for k in [1, 10, 100] {
        group.bench_function(format!("tree-{k}"), |b| {
            b.iter(|| tree.knn(black_box(&query), k, &knn_options));
        });
        group.bench_function(format!("linear-{k}"), |b| {
            b.iter(|| tree.linear_knn(black_box(&query), k));
        });
    }
    group.finish();
}

criterion_group!(benches, knn_search);
criterion_main!(benches);
