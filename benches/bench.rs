// Criterion benchmarks for Stylist Client

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use stylist_client::core::{decode_image, encode_bytes};
use stylist_client::models::SimilarityResponse;

fn bench_encode_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_payload");

    for size_kb in [64usize, 512, 4096].iter() {
        let bytes: Vec<u8> = (0..size_kb * 1024).map(|i| (i % 251) as u8).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size_kb), &bytes, |b, bytes| {
            b.iter(|| encode_bytes(black_box(bytes)))
        });
    }

    group.finish();
}

fn bench_decode_image(c: &mut Criterion) {
    let encoded = encode_bytes(&vec![7u8; 512 * 1024]);

    c.bench_function("decode_image_512kb", |b| {
        b.iter(|| decode_image(black_box(&encoded)))
    });
}

fn bench_parse_similarity(c: &mut Criterion) {
    let entries: Vec<_> = (0..10)
        .map(|i| {
            if i % 2 == 0 {
                json!({"score": 1.0 - i as f64 / 10.0, "data_entry": {
                    "id": i, "name": format!("Item {}", i), "descriptions": ["casual", "cotton"]
                }})
            } else {
                json!({"id": i, "name": format!("Item {}", i), "descriptions": ["formal"]})
            }
        })
        .collect();
    let body = json!({ "data": entries }).to_string();

    c.bench_function("parse_similarity_response", |b| {
        b.iter(|| serde_json::from_str::<SimilarityResponse>(black_box(&body)))
    });
}

criterion_group!(
    benches,
    bench_encode_payload,
    bench_decode_image,
    bench_parse_similarity
);
criterion_main!(benches);
