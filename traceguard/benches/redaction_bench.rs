//! Benchmarks for the redaction pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use traceguard::payload::Payload;
use traceguard::redact::{RedactionPipeline, TextTransform};

fn redaction_benchmark(c: &mut Criterion) {
    let pipeline = RedactionPipeline::pattern_only().expect("pipeline builds");

    c.bench_function("pattern_apply", |b| {
        b.iter(|| {
            black_box(pipeline.apply(black_box(
                "Hi, I am Leia Organa, email leia.organa@rebelalliance.org, \
                 SSN 000-66-5678, card 4242-4242-4242-4242, account ACT-10019.",
            )))
        })
    });

    let payload = Payload::from(json!({
        "input": "call me at 555-843-1138",
        "customer": {
            "email": "han.solo@millenniumfalcon.net",
            "transactions": [
                {"date": "2026-02-22", "description": "Coaxium Fuel Purchase", "amount": "-$800.00"},
                {"date": "2026-02-17", "description": "Kessel Run Delivery Payment", "amount": "+$5,000.00"},
            ],
        },
    }));
    c.bench_function("payload_redact", |b| {
        b.iter(|| black_box(pipeline.redact(black_box(payload.clone()))))
    });
}

criterion_group!(benches, redaction_benchmark);
criterion_main!(benches);
