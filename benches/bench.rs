//! Criterion benchmarks for textclass.
//!
//! Covers tokenization, training and classification for the text classifiers
//! and distance computation and voting for K-nearest neighbours.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use textclass::analysis::tokenizer::{DefaultTokenizer, Tokenizer, WordTokenizer};
use textclass::classification::{
    DistanceMetric, IntentClassifier, KNearestNeighbors, KnnConfig, NaiveBayesClassifier,
};

const LABELS: [&str; 4] = ["sports", "finance", "science", "travel"];

/// Generate labeled documents for benchmarking.
fn generate_documents(count: usize) -> Vec<(String, &'static str)> {
    let words = [
        "match", "goal", "team", "stock", "market", "bond", "atom", "energy", "cell", "flight",
        "hotel", "beach", "score", "price", "theory", "journey", "coach", "profit", "orbit",
        "island",
    ];

    (0..count)
        .map(|i| {
            let label = LABELS[i % LABELS.len()];
            let doc: Vec<&str> = (0..12)
                .map(|j| words[(i * 7 + j * 13) % words.len()]) // Pseudo-random distribution
                .collect();
            (doc.join(" "), label)
        })
        .collect()
}

/// Generate labeled vectors for benchmarking.
fn generate_vectors(count: usize, dimension: usize) -> (Vec<Vec<f64>>, Vec<String>) {
    let mut samples = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);
    for i in 0..count {
        let data: Vec<f64> = (0..dimension)
            .map(|j| (i as f64 * 0.1 + j as f64 * 0.01).sin())
            .collect();
        labels.push(LABELS[i % LABELS.len()].to_string());
        samples.push(data);
    }
    (samples, labels)
}

fn bench_tokenizers(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizers");
    let docs = generate_documents(100);

    let default = DefaultTokenizer::new();
    let word = WordTokenizer::new();

    group.throughput(Throughput::Elements(docs.len() as u64));
    group.bench_function("default", |b| {
        b.iter(|| {
            for (text, _) in &docs {
                black_box(default.tokenize_to_strings(black_box(text)).unwrap());
            }
        })
    });
    group.bench_function("word", |b| {
        b.iter(|| {
            for (text, _) in &docs {
                black_box(word.tokenize_to_strings(black_box(text)).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_text_classifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_classifiers");
    let docs = generate_documents(1000);

    group.throughput(Throughput::Elements(docs.len() as u64));
    group.bench_function("naive_bayes_learn", |b| {
        b.iter(|| {
            let mut classifier = NaiveBayesClassifier::new();
            for (text, label) in &docs {
                classifier.learn(text, label).unwrap();
            }
            black_box(classifier)
        })
    });

    let mut naive_bayes = NaiveBayesClassifier::new();
    let intent = IntentClassifier::with_tokenizer(Arc::new(DefaultTokenizer::new()));
    for (text, label) in &docs {
        naive_bayes.learn(text, label).unwrap();
        intent.train(text, label).unwrap();
    }

    group.throughput(Throughput::Elements(1));
    group.bench_function("naive_bayes_classify", |b| {
        b.iter(|| black_box(naive_bayes.classify(black_box("goal team stock orbit"))))
    });
    group.bench_function("intent_classify", |b| {
        b.iter(|| black_box(intent.classify(black_box("goal team stock orbit"))))
    });

    group.finish();
}

fn bench_knn(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn");
    group.sample_size(20);

    let dimension = 32;
    let (samples, labels) = generate_vectors(2000, dimension);
    let (queries, _) = generate_vectors(64, dimension);

    for metric in [DistanceMetric::Euclidean, DistanceMetric::SqrtManhattan] {
        let mut knn = KNearestNeighbors::new(KnnConfig::new(5, metric, dimension)).unwrap();
        knn.learn_batch(samples.clone(), labels.clone()).unwrap();

        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("classify_one_{}", metric.name()), |b| {
            b.iter(|| black_box(knn.classify_one(black_box(&queries[0])).unwrap()))
        });

        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("classify_batch_{}", metric.name()), |b| {
            b.iter(|| black_box(knn.classify(black_box(&queries)).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenizers, bench_text_classifiers, bench_knn);
criterion_main!(benches);
