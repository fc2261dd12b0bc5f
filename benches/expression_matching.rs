//! Filter expression benchmarks.
//!
//! Measures compiling expressions, evaluating them against generated IED
//! name lists, and the effect of the shared expression cache.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use icd_catalog::matcher::{
    filter_candidates_with, match_hierarchy_with, CompiledExpression, ExpressionCache,
    HierarchyFilter, HierarchyPath,
};
use icd_catalog::MatcherConfig;

const EXPRESSIONS: &[(&str, &str)] = &[
    ("single_wildcard", "*BCU*"),
    ("with_exclusion", "*BCU*, !*CBO*BCU*"),
    ("small_range", "*TGSCU1-8"),
    ("mixed", "*BCU1-20; *PIU* -*TEST* ?SCU*"),
];

fn generate_ied_names(count: usize) -> Vec<String> {
    let kinds = ["BCU", "CBO_BCU", "TGSCU", "PIU", "SCU", "TEST_PIU"];
    (0..count)
        .map(|i| format!("POSTE{}_{}{}", i / 64, kinds[i % kinds.len()], i % 24))
        .collect()
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression_compile");
    let config = MatcherConfig::default();

    for (name, expression) in EXPRESSIONS {
        group.bench_with_input(BenchmarkId::new("compile", name), expression, |b, expr| {
            b.iter(|| CompiledExpression::with_config(black_box(expr), &config))
        });
    }

    group.bench_function("large_range", |b| {
        b.iter(|| CompiledExpression::with_config(black_box("LN1-500"), &config))
    });

    group.finish();
}

fn bench_filter_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_candidates");

    for &count in &[100usize, 1_000, 10_000] {
        let names = generate_ied_names(count);
        group.throughput(Throughput::Elements(count as u64));

        for (name, expression) in EXPRESSIONS {
            let cache = ExpressionCache::new();
            group.bench_with_input(BenchmarkId::new(*name, count), &names, |b, names| {
                b.iter(|| {
                    filter_candidates_with(&cache, names.iter().map(String::as_str), expression)
                })
            });
        }
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression_cache");
    let names = generate_ied_names(64);

    let cached = ExpressionCache::new();
    group.bench_function("cached", |b| {
        b.iter(|| {
            for name in &names {
                black_box(cached.get_or_compile("*BCU*, !*CBO*BCU*").matches(name));
            }
        })
    });

    let uncached = ExpressionCache::with_config(MatcherConfig {
        cache_capacity: 0,
        ..Default::default()
    });
    group.bench_function("uncached", |b| {
        b.iter(|| {
            for name in &names {
                black_box(uncached.get_or_compile("*BCU*, !*CBO*BCU*").matches(name));
            }
        })
    });

    group.finish();
}

fn bench_hierarchy(c: &mut Criterion) {
    let cache = ExpressionCache::new();
    let paths: Vec<HierarchyPath> = generate_ied_names(1_000)
        .into_iter()
        .enumerate()
        .map(|(i, ied)| {
            HierarchyPath::new(ied, format!("LD{}", i % 4), ["PDIS", "PTOC", "XCBR"][i % 3], (i % 9).to_string())
        })
        .collect();
    let filter = HierarchyFilter::any()
        .with_ied("*BCU*, !*CBO*")
        .with_ln("PDIS, PTOC")
        .with_lninst("1-4");

    c.bench_function("match_hierarchy_1000", |b| {
        b.iter(|| {
            paths
                .iter()
                .filter(|path| match_hierarchy_with(&cache, path, &filter))
                .count()
        })
    });
}

criterion_group!(
    benches,
    bench_compile,
    bench_filter_lists,
    bench_cache,
    bench_hierarchy
);
criterion_main!(benches);
