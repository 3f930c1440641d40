//! Latency benchmarks for the keyword classifiers
//!
//! Run with: cargo bench -p fitcheck-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fitcheck_classifiers::{FilenameAnalyzer, GarmentClassifier, RequestParser};

fn benchmark_garment_classifier(c: &mut Criterion) {
    let classifier = GarmentClassifier::with_defaults().expect("Failed to create classifier");

    let test_cases = vec![
        ("empty", ""),
        ("short", "gray hoodie"),
        ("medium", "Elegant navy blazer in thick wool, perfect for business meetings"),
        (
            "long",
            "A relaxed, comfortable everyday t-shirt made from light breathable cotton. \
             Works for summer afternoons at the beach, casual dinners, and weekend errands. \
             Pairs well with denim shorts or linen trousers and white sneakers.",
        ),
    ];

    let mut group = c.benchmark_group("Garment_Classifier");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("classify", name), &text, |b, text| {
            b.iter(|| classifier.classify(black_box(text)));
        });
    }

    group.finish();
}

fn benchmark_request_parser(c: &mut Criterion) {
    let parser = RequestParser::with_defaults().expect("Failed to create parser");

    let test_cases = vec![
        ("defaults", "what should I wear"),
        ("business", "What should I wear for a professional business meeting?"),
        ("casual_hot", "I need something casual for a hot summer day"),
    ];

    let mut group = c.benchmark_group("Request_Parser");
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("parse", name), &text, |b, text| {
            b.iter(|| parser.parse(black_box(text)));
        });
    }

    group.finish();
}

fn benchmark_filename_analyzer(c: &mut Criterion) {
    let analyzer = FilenameAnalyzer::with_defaults().expect("Failed to create analyzer");

    c.bench_function("filename_analyze", |b| {
        b.iter(|| analyzer.analyze(black_box("IMG_2041_navy-formal_blazer.jpg")));
    });
}

criterion_group!(
    benches,
    benchmark_garment_classifier,
    benchmark_request_parser,
    benchmark_filename_analyzer
);
criterion_main!(benches);
