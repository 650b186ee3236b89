//! Benchmarks for chain parsing and evaluation
//!
//! Measures:
//! - Parsing cost as chains grow
//! - Evaluation of built-in rule chains, stopping early and collecting all
//! - Pattern vs closure vs async controls

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use verifchain::prelude::*;

fn chain_of(len: usize) -> String {
    (0..len)
        .map(|i| format!("minLength:{i}"))
        .collect::<Vec<_>>()
        .join("|")
}

fn parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain/parse");

    for len in [1, 8, 64] {
        let text = chain_of(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| black_box(parse_chain(black_box(text))));
        });
    }

    group.finish();
}

fn evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain/evaluate");
    let rt = tokio::runtime::Runtime::new().unwrap();
    let registry = RuleRegistry::<String>::with_builtins();
    let content = "a".repeat(32);

    for len in [1, 8, 64] {
        let text = chain_of(len);
        group.bench_with_input(BenchmarkId::new("collect_all", len), &text, |b, text| {
            b.to_async(&rt).iter(|| async {
                black_box(registry.evaluate(text, &content, false).await.unwrap())
            });
        });
    }

    let failing = "required|minLength:64|maxLength:128|numeric";
    group.bench_function("stop_on_error", |b| {
        b.to_async(&rt).iter(|| async {
            black_box(registry.evaluate_default(failing, &content).await.unwrap())
        });
    });

    group.finish();
}

fn control_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain/control");
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut registry = RuleRegistry::<String>::new();
    registry
        .add_rules([
            RuleSpec::new("pattern", Control::pattern("^[a-z]+$").unwrap(), "pattern"),
            RuleSpec::new(
                "sync",
                Control::func(|c: &String, _: &[String]| c.bytes().all(|b| b.is_ascii_lowercase())),
                "sync",
            ),
            RuleSpec::new(
                "async",
                Control::async_fn(|c: String, _: Vec<String>| async move {
                    Ok::<_, BoxError>(c.bytes().all(|b| b.is_ascii_lowercase()))
                }),
                "async",
            ),
        ])
        .unwrap();
    let content = "abcdefghij".to_owned();

    for name in ["pattern", "sync", "async"] {
        group.bench_function(name, |b| {
            b.to_async(&rt)
                .iter(|| async { black_box(registry.evaluate_default(name, &content).await.unwrap()) });
        });
    }

    group.finish();
}

criterion_group!(benches, parsing, evaluation, control_shapes);
criterion_main!(benches);
