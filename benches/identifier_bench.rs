//! Identifier parsing and resolution benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use typeheal::{
    MovedFrom, OnMiss, ResolutionEngine, StaticUniverse, parse_identifier, stringify,
};

const SIMPLE: &str = "System.Int32, mscorlib";
const VERSIONED: &str =
    "System.Int32, mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";
const NESTED: &str =
    "Outer`1[[Inner`1[[System.Int32, mscorlib]], MyAssembly]], MyAssembly";
const DICTIONARY: &str = "System.Collections.Generic.Dictionary`2[[System.String, mscorlib],[System.Collections.Generic.List`1[[System.Int32, mscorlib]], mscorlib]], mscorlib";
const ARRAYS: &str = "System.Collections.Generic.List`1[[System.Int32[,], mscorlib]][], mscorlib";

fn nested_identifier(depth: usize) -> String {
    let mut id = SIMPLE.to_string();
    for _ in 0..depth {
        id = format!("System.Collections.Generic.List`1[[{id}]], mscorlib");
    }
    id
}

/// A universe of `modules` modules with `types_per_module` types each, plus
/// the handful of types the identifiers above name.
fn universe(modules: usize, types_per_module: usize) -> Arc<StaticUniverse> {
    let mut builder = StaticUniverse::builder();
    let corlib = builder.add_module("mscorlib");
    for name in [
        "System.Int32",
        "System.String",
        "System.Collections.Generic.List`1",
        "System.Collections.Generic.Dictionary`2",
    ] {
        builder.add_type(corlib, name);
    }
    for m in 0..modules {
        let module = builder.add_module(format!("Module{m}"));
        for t in 0..types_per_module {
            builder.add_type(module, format!("Namespace{m}.Type{t}"));
        }
    }
    let last = builder.add_module("Game");
    let moved = builder.add_type(last, "New.Foo");
    builder.mark_moved_from(moved, MovedFrom::namespace("Old"));
    builder.add_type(last, "Scanned.Target");
    Arc::new(builder.build())
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("identifier_parse");
    let cases = [
        ("simple", SIMPLE),
        ("versioned", VERSIONED),
        ("nested", NESTED),
        ("dictionary", DICTIONARY),
        ("arrays", ARRAYS),
    ];
    for (name, id) in cases {
        group.bench_with_input(BenchmarkId::new("parse", name), id, |b, id| {
            b.iter(|| black_box(parse_identifier(id)))
        });
        let descriptor = parse_identifier(id).expect("bench identifier parses");
        group.bench_with_input(BenchmarkId::new("stringify", name), &descriptor, |b, d| {
            b.iter(|| black_box(stringify(d)))
        });
    }
    for depth in [8, 64, 512] {
        let id = nested_identifier(depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &id, |b, id| {
            b.iter(|| black_box(parse_identifier(id)))
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("identifier_resolve");
    let engine = ResolutionEngine::new(universe(50, 200));
    let cases = [
        ("fast_path", DICTIONARY),
        ("moved_type", "Old.Foo, Game"),
        ("module_scan", "Scanned.Target, Elsewhere"),
        ("miss", "Nowhere.Ghost, Elsewhere"),
    ];
    for (name, id) in cases {
        group.bench_with_input(BenchmarkId::new("warm_cache", name), id, |b, id| {
            b.iter(|| black_box(engine.parse_and_resolve(id, OnMiss::Absent)))
        });
    }

    for modules in [10, 100, 1_000] {
        let shared = universe(modules, 20);
        group.bench_with_input(BenchmarkId::new("cold_scan", modules), &shared, |b, shared| {
            b.iter(|| {
                let engine = ResolutionEngine::new(shared.clone());
                black_box(engine.parse_and_resolve("Scanned.Target, Elsewhere", OnMiss::Absent))
            })
        });
    }
    group.finish();
}

criterion_group!(identifier_benches, bench_parse, bench_resolve);
criterion_main!(identifier_benches);
