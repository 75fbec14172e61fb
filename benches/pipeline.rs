//! Benchmarks for the igdigest pipeline stages.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench pipeline -- normalize`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use igdigest::analysis::{hour_month_matrix, word_frequency};
use igdigest::classify::{Classifier, ContentClassifier};
use igdigest::loader::{Loader, ThreadLoader};
use igdigest::normalize::{Normalizer, TextNormalizer, fix_mojibake};
use igdigest::pipeline::ThreadAnalyzer;
use igdigest::time::TimeBucketer;

const SIZES: [usize; 3] = [1_000, 10_000, 50_000];

// =============================================================================
// Test Data Generators
// =============================================================================

fn mangle(s: &str) -> String {
    s.bytes().map(char::from).collect()
}

fn generate_thread_json(count: usize) -> String {
    let mut messages = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "alice_user" } else { "bob_user" };
        let timestamp = 1705314600000i64 - (i as i64 * 60000);
        let content = match i % 5 {
            0 => format!("{} sent an attachment.", sender),
            1 => mangle(&format!("café number {} 😀", i)),
            _ => format!("Message number {}", i),
        };
        messages.push(serde_json::json!({
            "sender_name": sender,
            "timestamp_ms": timestamp,
            "content": content,
        }));
    }
    serde_json::json!({
        "participants": [{"name": "alice_user"}, {"name": "bob_user"}],
        "messages": messages,
    })
    .to_string()
}

// =============================================================================
// Stage Benchmarks
// =============================================================================

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let loader = ThreadLoader::new();

    for size in SIZES {
        let json = generate_thread_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| black_box(loader.load_str(black_box(json)).unwrap()));
        });
    }
    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = TextNormalizer::default();

    group.bench_function("fix_mojibake_short", |b| {
        let text = mangle("café 😀 Привет");
        b.iter(|| black_box(fix_mojibake(black_box(&text)).unwrap()));
    });

    for size in SIZES {
        let dataset = ThreadLoader::new()
            .load_str(&generate_thread_json(size))
            .unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &dataset.messages,
            |b, messages| {
                b.iter(|| black_box(normalizer.normalize_all(messages.clone()).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let classifier = ContentClassifier::default();
    let bucketer = TimeBucketer::default();

    for size in SIZES {
        let raw = ThreadLoader::new()
            .load_str(&generate_thread_json(size))
            .unwrap()
            .messages;
        let content = classifier.classify(&raw);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("classify", size), &raw, |b, raw| {
            b.iter(|| black_box(classifier.classify(black_box(raw))));
        });
        group.bench_with_input(BenchmarkId::new("word_frequency", size), &content, |b, content| {
            b.iter(|| black_box(word_frequency(black_box(content), 5)));
        });
        group.bench_with_input(BenchmarkId::new("hour_month_matrix", size), &raw, |b, raw| {
            b.iter(|| black_box(hour_month_matrix(black_box(raw), &bucketer)));
        });
    }
    group.finish();
}

// =============================================================================
// End-to-end
// =============================================================================

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = ThreadAnalyzer::new();

    for size in SIZES {
        let json = generate_thread_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| black_box(analyzer.analyze_str(black_box(json)).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_load,
    bench_normalize,
    bench_aggregate,
    bench_analyze,
);

criterion_main!(benches);
