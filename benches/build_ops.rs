//! Benchmarks for build operations.

use criterion::{criterion_group, criterion_main, Criterion};

use cornice::algo;
use cornice::prelude::*;

fn shell(floor_count: usize) -> PolyMesh {
    let mut mesh = PolyMesh::new();
    algo::floorplan::build(
        &mut mesh,
        &FloorplanStyle::Rectangular {
            width: 3.0,
            length: 2.0,
        },
    )
    .unwrap();
    let mut ctx = BuildContext::new(&mut mesh);
    algo::floor::build(
        &mut ctx,
        &FloorParams {
            floor_count,
            ..Default::default()
        },
    )
    .unwrap();
    mesh
}

fn bench_floorplans(c: &mut Criterion) {
    c.bench_function("floorplan_random", |b| {
        b.iter(|| {
            let mut mesh = PolyMesh::new();
            algo::floorplan::build(
                &mut mesh,
                &FloorplanStyle::Random {
                    seed: 42,
                    width: 4.0,
                    length: 4.0,
                },
            )
            .unwrap();
            mesh
        });
    });

    c.bench_function("floorplan_h_shaped", |b| {
        b.iter(|| {
            let mut mesh = PolyMesh::new();
            algo::floorplan::build(
                &mut mesh,
                &FloorplanStyle::HShaped {
                    width: 2.0,
                    length: 2.0,
                    lengths: [1.0; 4],
                    widths: [0.5; 4],
                },
            )
            .unwrap();
            mesh
        });
    });
}

fn bench_floors(c: &mut Criterion) {
    c.bench_function("floors_10_stories", |b| {
        b.iter(|| shell(10));
    });
}

fn bench_windows(c: &mut Criterion) {
    c.bench_function("window_glass_panes", |b| {
        b.iter(|| {
            let mut mesh = shell(1);
            let wall = mesh
                .face_ids()
                .find(|&f| mesh.face_normal(f).y < -0.9 && mesh.face_center(f).z > 0.2)
                .unwrap();
            mesh.select_faces(&[wall], true);
            let mut ctx = BuildContext::new(&mut mesh);
            algo::window::build(&mut ctx, &WindowParams::default()).unwrap();
            mesh
        });
    });
}

criterion_group!(benches, bench_floorplans, bench_floors, bench_windows);
criterion_main!(benches);
