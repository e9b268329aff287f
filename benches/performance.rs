// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use holiday_parts::geometry::{analyze, extrude, Profile};
use holiday_parts::models::gingerbread::{self, Piece};
use holiday_parts::models::HouseParams;
use holiday_parts::validation::{validate_parts, CheckSettings};

fn bench_profiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile");

    for segments in [8u32, 32, 128] {
        group.bench_with_input(
            BenchmarkId::new("wall_with_arch", segments),
            &segments,
            |b, &segments| {
                b.iter(|| {
                    let wall = Profile::rect((-50.0, 0.0), (50.0, 80.0));
                    let arch = Profile::arched_opening(20.0, 40.0, None, black_box(segments))
                        .translate(0.0, 5.0);
                    wall.difference(&arch)
                });
            },
        );
    }

    group.finish();
}

fn bench_extrude(c: &mut Criterion) {
    let mut group = c.benchmark_group("extrude");

    let plate = Profile::centered_rect(0.0, 0.0, 100.0, 60.0);
    group.bench_function("plate", |b| {
        b.iter(|| extrude(black_box(&plate), 5.0).unwrap())
    });

    let wall = Profile::rect((-50.0, 0.0), (50.0, 80.0))
        .difference(&Profile::arched_opening(20.0, 40.0, None, 64).translate(0.0, 5.0));
    group.bench_function("arched_wall", |b| {
        b.iter(|| extrude(black_box(&wall), 3.8).unwrap())
    });

    group.finish();
}

fn bench_house(c: &mut Criterion) {
    let mut group = c.benchmark_group("house");
    let params = HouseParams::default();

    group.bench_function("build_all", |b| {
        b.iter(|| gingerbread::build(black_box(&params)).unwrap())
    });

    group.bench_function("front_wall", |b| {
        b.iter(|| gingerbread::build_one(black_box(&params), Piece::FrontWall).unwrap())
    });

    let set = gingerbread::build(&params).unwrap();
    group.bench_function("validate_all", |b| {
        b.iter(|| validate_parts(black_box(&set.parts), &CheckSettings::default()))
    });

    group.finish();
}

fn bench_analytics(c: &mut Criterion) {
    let params = HouseParams::default();
    let wall = gingerbread::build_one(&params, Piece::FrontWall).unwrap();

    c.bench_function("analyze_front_wall", |b| {
        b.iter(|| analyze(black_box(&wall.mesh)))
    });
}

criterion_group!(
    benches,
    bench_profiles,
    bench_extrude,
    bench_house,
    bench_analytics
);
criterion_main!(benches);
