//! Benchmarks for the analysis pipeline
//!
//! Measures parse and full-pipeline throughput on synthetic stats
//! documents of increasing module counts.

use bundlescope::analyzer::{Analyzer, AnalyzerOptions};
use bundlescope::stats::parse_stats;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Build a synthetic stats document with the given number of modules.
fn synthetic_stats(module_count: usize) -> String {
    let mut modules = Vec::with_capacity(module_count);
    for i in 0..module_count {
        let name = if i % 3 == 0 {
            format!("./node_modules/pkg{}/index.js", i / 3)
        } else {
            format!("./src/feature{}/mod{}.js", i % 10, i)
        };
        modules.push(format!(
            r#"{{"name": "{name}", "size": {}, "reasons": ["./src/index.js"]}}"#,
            100 + (i * 37) % 5000
        ));
    }

    format!(
        r#"{{
            "assets": [{{"size": 5000000, "gzipSize": 1500000}}],
            "modules": [{}],
            "chunks": [
                {{"id": 0, "name": "main", "size": 3000000, "initial": true, "modules": []}},
                {{"id": 1, "name": "vendor", "size": 2000000, "modules": []}}
            ]
        }}"#,
        modules.join(",")
    )
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_stats");
    for count in [100, 1000, 5000] {
        let json = synthetic_stats(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &json, |b, json| {
            b.iter(|| parse_stats(black_box(json)).unwrap());
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for count in [100, 1000, 5000] {
        let raw = parse_stats(&synthetic_stats(count)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(count), &raw, |b, raw| {
            b.iter(|| {
                Analyzer::new(AnalyzerOptions::default())
                    .analyze(black_box(raw))
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_analyze);
criterion_main!(benches);
