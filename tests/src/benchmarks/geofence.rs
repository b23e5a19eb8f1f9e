//! # Geofence Benchmarks
//!
//! Point-in-polygon cost against fence size.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use npnt_core::{point_in_polygon, Coordinate, Fence};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Regular polygon with `n` vertices around (10, 10), radius 1 degree.
pub fn circular_fence(n: usize) -> Vec<Coordinate> {
    (0..n)
        .map(|i| {
            let a = TAU * i as f64 / n as f64;
            Coordinate::new(10.0 + a.sin(), 10.0 + a.cos())
        })
        .collect()
}

pub fn pnpoly_by_vertex_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("npnt/geofence/pnpoly");

    for n in [4usize, 16, 64, 256, 1024] {
        let fence = Fence::new(&circular_fence(n)).expect("valid fence");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("inside", n), &fence, |b, fence| {
            b.iter(|| black_box(fence.contains(black_box(10.1), black_box(9.9))))
        });
        group.bench_with_input(BenchmarkId::new("outside", n), &fence, |b, fence| {
            b.iter(|| black_box(fence.contains(black_box(12.0), black_box(9.9))))
        });
    }

    group.finish();
}

pub fn pnpoly_random_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("npnt/geofence/random_points");
    let mut rng = StdRng::seed_from_u64(7);
    let points: Vec<(f64, f64)> = (0..1024)
        .map(|_| (rng.gen_range(8.5..11.5), rng.gen_range(8.5..11.5)))
        .collect();
    let vertices = circular_fence(64);
    let lats: Vec<f64> = vertices.iter().map(|v| v.latitude).collect();
    let lons: Vec<f64> = vertices.iter().map(|v| v.longitude).collect();

    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("1024_points_64_vertices", |b| {
        b.iter(|| {
            points
                .iter()
                .filter(|&&(lat, lon)| point_in_polygon(&lats, &lons, lat, lon))
                .count()
        })
    });

    group.finish();
}
