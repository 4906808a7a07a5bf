//! Benchmarks for composition and rendering.
//!
//! Run with: cargo bench -p solid-maker
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p solid-maker -- --save-baseline main
//! 2. After changes: cargo bench -p solid-maker -- --baseline main

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use solid_csg::{CsgNode, Primitive};
use solid_maker::{
    AnchorArgs, AnchorDef, AnchorTable, Maker, MakerResult, RenderResult, Renderer, Shape,
    ShapeExt, render,
};
use solid_types::{AnchorPath, Frame, ShapeName, anchor_path};

// =============================================================================
// Test Model Generation
// =============================================================================

/// A unit tile with a `top` anchor one unit up, turned a few degrees.
#[derive(Debug)]
struct Tile;

fn top(_: &Tile, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&[])?;
    Ok(Frame::translation(0.0, 0.0, 1.0) * Frame::rotation_z(7.5))
}

static TILE_ANCHORS: AnchorTable<Tile> =
    AnchorTable::new("Tile", &[AnchorDef::new("top", "Stacking face.", top)]);

impl Shape for Tile {
    fn type_name(&self) -> &str {
        "Tile"
    }

    fn anchor(&self, path: &AnchorPath) -> MakerResult<Frame> {
        TILE_ANCHORS.resolve(self, path)
    }

    fn anchor_names(&self) -> Vec<String> {
        TILE_ANCHORS.names().into_iter().map(String::from).collect()
    }

    fn render(&self, renderer: &mut Renderer) -> RenderResult<()> {
        renderer.add(CsgNode::primitive(
            Primitive::new("cube").with_param("size", [1.0, 1.0, 1.0]),
        ))
    }
}

/// A tower of `count` tiles, every third one a hole.
fn create_tower(count: i64) -> MakerResult<Maker> {
    let mut maker = Tile.solid(ShapeName::indexed("tile", 0)).at_origin();
    for i in 1..count {
        let below = AnchorPath::new()
            .arg(ShapeName::indexed("tile", i - 1))
            .arg("top");
        let tile = Tile.solid_hole(ShapeName::indexed("tile", i), i % 3 == 0);
        maker.add_at(tile.at_origin(), &below)?;
    }
    Ok(maker)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");

    for count in [10_i64, 100, 500] {
        group.throughput(Throughput::Elements(count.unsigned_abs()));
        group.bench_with_input(BenchmarkId::new("tower", count), &count, |b, &count| {
            b.iter(|| create_tower(black_box(count)));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render");

    for count in [10_i64, 100, 500] {
        let Ok(tower) = create_tower(count) else {
            continue;
        };
        group.throughput(Throughput::Elements(count.unsigned_abs()));
        group.bench_with_input(BenchmarkId::new("tower", count), &tower, |b, tower| {
            b.iter(|| render(black_box(tower)));
        });
    }

    group.finish();
}

fn bench_anchor(c: &mut Criterion) {
    let Ok(tower) = create_tower(100) else {
        return;
    };
    let path = AnchorPath::new()
        .arg(ShapeName::indexed("tile", 99))
        .arg("top");

    c.bench_function("anchor_lookup_deep", |b| {
        b.iter(|| tower.anchor(black_box(&path)));
    });
    c.bench_function("anchor_lookup_root", |b| {
        b.iter(|| tower.anchor(black_box(&anchor_path!("top"))));
    });
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_build, bench_render, bench_anchor);
criterion_main!(benches);
