use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cloudio::pcd::{read_pcd, read_pcd_file, write_pcd};
use cloudio::ply::read_ply_file;
use cloudio::velodyne::read_velodyn_bin_file;
use cloudio::PointXyz;
use std::path::Path;

fn bench_read_ply(c: &mut Criterion) {
    c.bench_function("read_ply", |b| {
        let p = Path::new("test_files/ply/binary_little_endian.ply");
        b.iter(|| {
            _ = read_ply_file(black_box(p));
        })
    });
}

fn bench_read_pcd(c: &mut Criterion) {
    c.bench_function("read_pcd", |b| {
        let p = Path::new("test_files/pcd/binary.pcd");
        b.iter(|| {
            _ = read_pcd_file(black_box(p));
        })
    });
}

fn bench_read_bin(c: &mut Criterion) {
    c.bench_function("read_bin", |b| {
        let p = Path::new("test_files/velodyne/000001.bin");
        b.iter(|| {
            _ = read_velodyn_bin_file(black_box(p));
        })
    });
}

fn bench_ascii_pcd_100k(c: &mut Criterion) {
    let points: Vec<PointXyz<f32>> = (0..100_000)
        .map(|i| {
            let i = i as f32;
            PointXyz::new(i * 0.01, -i * 0.02, i.sqrt())
        })
        .collect();
    let mut bytes = Vec::new();
    write_pcd(&points, &mut bytes).unwrap();

    c.bench_function("read_ascii_pcd_100k", |b| {
        b.iter(|| {
            _ = read_pcd(black_box(bytes.as_slice()));
        })
    });
}

criterion_group!(
    benches,
    bench_read_ply,
    bench_read_pcd,
    bench_read_bin,
    bench_ascii_pcd_100k
);
criterion_main!(benches);
