//! Benchmarks of goal point selection over increasingly long paths.
//!
//! Every cycle rescans the path from its start, so the cost grows with the
//! number of points before the goal.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Point2;
use track_lib::track_ctrl::find_goal_point;

/// A straight path along world X with the given point spacing.
fn straight_path(num_points: usize, sep_m: f64) -> Vec<Point2<f64>> {
    (0..num_points)
        .map(|i| Point2::new(i as f64 * sep_m, 0.0))
        .collect()
}

fn bench_goal_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_goal_point");

    for &num_points in [100usize, 1_000, 10_000].iter() {
        let path = straight_path(num_points, 0.05);

        // Robot at the start, goal near the start of the path
        group.bench_with_input(
            BenchmarkId::new("goal_near_start", num_points), 
            &path, 
            |b, path| b.iter(|| {
                find_goal_point(black_box(&Point2::origin()), black_box(path), 1.0)
            })
        );

        // Robot near the end, every point is scanned
        let end = path[num_points - 1];
        group.bench_with_input(
            BenchmarkId::new("fallback_to_end", num_points), 
            &path, 
            |b, path| b.iter(|| {
                find_goal_point(black_box(&end), black_box(path), 1e6)
            })
        );
    }

    group.finish();
}

criterion_group!(benches, bench_goal_point);
criterion_main!(benches);
