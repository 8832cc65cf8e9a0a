use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use planar_linalg::Mat3;
use planar_warp::{transform_points_scalar, transform_points_simd};
use rand::Rng;
use std::hint::black_box;

fn bench_transform_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_points");
    let mut rng = rand::rng();

    let m = Mat3::from_rows([
        [1.1, 0.2, 3.0],
        [-0.1, 0.9, -2.0],
        [0.0001, -0.0002, 1.0],
    ]);

    for num_points in [1_000usize, 100_000, 1_000_000] {
        let src: Vec<[f32; 2]> = (0..num_points)
            .map(|_| [rng.random_range(0.0..1920.0), rng.random_range(0.0..1080.0)])
            .collect();
        let mut dst = vec![[0.0f32; 2]; num_points];

        group.throughput(Throughput::Elements(num_points as u64));

        group.bench_with_input(BenchmarkId::new("scalar", num_points), &src, |b, src| {
            b.iter(|| black_box(transform_points_scalar(&m, black_box(src), &mut dst)))
        });

        group.bench_with_input(BenchmarkId::new("simd", num_points), &src, |b, src| {
            b.iter(|| black_box(transform_points_simd(&m, black_box(src), &mut dst)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transform_points);
criterion_main!(benches);
