//! Physics core benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- broadphase

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sandphys::physics::arena::ScratchArena;
use sandphys::physics::broadphase::{BroadPhase, CollisionMatrix};
use sandphys::physics::collider::Aabb;
use sandphys::physics::narrowphase::{circle_circle, circle_rectangle};
use sandphys::physics::{PhysicsConfig, PhysicsWorld};
use sandphys_bench::*;

// ---------------------------------------------------------------------------
// Broadphase
// ---------------------------------------------------------------------------

fn bench_broadphase(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("broadphase/grid_balls");
        for &n in &[50, 100, 250, 500] {
            let mut world = setup_ball_world(n);
            let mut broadphase = BroadPhase::new();
            let matrix = CollisionMatrix::default();
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| broadphase.detect(&mut world, &matrix));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("broadphase/sparse");
        for &n in &[50, 100, 250, 500] {
            let mut world = setup_sparse_world(n);
            let mut broadphase = BroadPhase::new();
            let matrix = CollisionMatrix::default();
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| broadphase.detect(&mut world, &matrix));
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Narrowphase
// ---------------------------------------------------------------------------

fn bench_narrowphase(c: &mut Criterion) {
    let mut arena = ScratchArena::default();
    let mut rng = StdRng::seed_from_u64(1);

    {
        let mut group = c.benchmark_group("narrowphase/circle_circle");
        group.bench_function("intersecting", |b| {
            b.iter(|| {
                circle_circle(
                    Vec2::ZERO,
                    10.0,
                    Vec2::new(15.0, 0.0),
                    10.0,
                    &mut arena.scope(),
                    &mut rng,
                )
            });
        });
        group.bench_function("separated", |b| {
            b.iter(|| {
                circle_circle(
                    Vec2::ZERO,
                    10.0,
                    Vec2::new(50.0, 0.0),
                    10.0,
                    &mut arena.scope(),
                    &mut rng,
                )
            });
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("narrowphase/circle_rectangle");
        let block = Aabb::new(Vec2::ZERO, Vec2::new(100.0, 40.0));
        group.bench_function("outside", |b| {
            b.iter(|| circle_rectangle(Vec2::new(50.0, -5.0), 10.0, &block, &mut arena.scope()));
        });
        group.bench_function("inside", |b| {
            b.iter(|| circle_rectangle(Vec2::new(50.0, 3.0), 10.0, &block, &mut arena.scope()));
        });
        group.bench_function("separated", |b| {
            b.iter(|| circle_rectangle(Vec2::new(50.0, -50.0), 10.0, &block, &mut arena.scope()));
        });
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Full tick
// ---------------------------------------------------------------------------

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step/grid_balls");
    for &n in &[50, 100, 250] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || (setup_ball_world(n), PhysicsWorld::new(PhysicsConfig::default())),
                |(mut world, mut physics)| physics.step(&mut world, 1.0),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_broadphase, bench_narrowphase, bench_step);
criterion_main!(benches);
