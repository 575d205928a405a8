// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for carousel adjacency and selection churn.
//!
//! Measures the performance of:
//! - Pure next/previous adjacency over small and large catalogs
//! - The full selection path (rebind + load request) under rapid navigation

use criterion::{criterion_group, criterion_main, Criterion};
use model_carousel::catalog::carousel;
use model_carousel::{AssetDescriptor, Catalog, HeadlessSurface, Viewer, ViewerOptions};
use std::hint::black_box;

/// Builds a synthetic catalog of `count` assets.
fn large_catalog(count: usize) -> Catalog {
    Catalog::new(
        (0..count)
            .map(|n| AssetDescriptor {
                id: format!("asset-{n:04}"),
                asset_url: format!("https://assets.example/asset-{n:04}.glb"),
                poster_url: format!("https://assets.example/asset-{n:04}.png"),
                title: format!("Asset {n}"),
                description: String::new(),
            })
            .collect(),
    )
    .expect("synthetic catalog should be valid")
}

/// Benchmark pure adjacency arithmetic.
fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel");

    let sample = Catalog::sample();
    group.bench_function("next_sample", |b| {
        b.iter(|| black_box(carousel::next(&sample, "robot-expressive").unwrap()));
    });

    let big = large_catalog(500);
    group.bench_function("next_500", |b| {
        b.iter(|| black_box(carousel::next(&big, "asset-0499").unwrap()));
    });
    group.bench_function("previous_500", |b| {
        b.iter(|| black_box(carousel::previous(&big, "asset-0000").unwrap()));
    });

    group.finish();
}

/// Benchmark the full selection path: rebind, load request, settle, pump.
fn bench_selection_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel");

    group.bench_function("walk_sample_catalog", |b| {
        b.iter(|| {
            let mut viewer = Viewer::new(
                Catalog::sample(),
                HeadlessSurface::completing(),
                ViewerOptions::default(),
            )
            .unwrap();
            for _ in 0..viewer.catalog().len() {
                viewer.next().unwrap();
                viewer.pump_events();
            }
            black_box(viewer.selected_id().len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_adjacency, bench_selection_churn);
criterion_main!(benches);
