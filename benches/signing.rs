//! Signing and validation benchmarks (HS224, SHA224-PREFIX)
//!
//! Benchmarks issuing, parsing, and validating both token variants
//! under each signature algorithm.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use timetoken::*;

const SECRET: &str = "bench-secret-key-for-timetoken";

fn algorithms() -> [(&'static str, Key); 2] {
    [
        ("HS224", Key::new(SECRET).unwrap()),
        (
            "SHA224-PREFIX",
            Key::new(SECRET)
                .unwrap()
                .algorithm(SignatureAlgorithm::Sha224Prefix),
        ),
    ]
}

fn field_token_wire(key: Key) -> String {
    let mut token = FieldToken::new(key);
    token.push("user42").unwrap().push("download").unwrap();
    token.sign().unwrap();
    token.serialize().unwrap()
}

fn bench_field_token(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_token");
    let config = ValidationConfig::default();

    for (name, key) in algorithms() {
        group.bench_function(format!("{name}/issue"), |b| {
            b.iter(|| field_token_wire(black_box(key.clone())));
        });

        let wire = field_token_wire(key.clone());
        group.bench_function(format!("{name}/parse"), |b| {
            b.iter(|| FieldToken::parse(black_box(&wire), key.clone()).unwrap());
        });

        let parsed = FieldToken::parse(&wire, key.clone()).unwrap();
        group.bench_function(format!("{name}/validate"), |b| {
            b.iter(|| black_box(&parsed).validate(&config).unwrap());
        });
    }

    group.finish();
}

fn bench_identity_token(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity_token");
    let config = ValidationConfig::default();

    for (name, key) in algorithms() {
        group.bench_function(format!("{name}/issue"), |b| {
            b.iter(|| IdentityToken::issue(black_box(key.clone())).unwrap().to_string());
        });

        let wire = IdentityToken::issue(key.clone()).unwrap().to_string();
        group.bench_function(format!("{name}/parse"), |b| {
            b.iter(|| IdentityToken::parse(black_box(&wire), key.clone()).unwrap());
        });

        let parsed = IdentityToken::parse(&wire, key.clone()).unwrap();
        group.bench_function(format!("{name}/validate"), |b| {
            b.iter(|| black_box(&parsed).validate(&config).unwrap());
        });
    }

    group.finish();
}

fn bench_rejection(c: &mut Criterion) {
    let mut group = c.benchmark_group("rejection");
    let key = Key::new(SECRET).unwrap();
    let wire = field_token_wire(key.clone());
    let tampered = wire.replacen("user42", "user43", 1);
    let config = ValidationConfig::default();

    // Rejection cost should match acceptance cost
    let parsed = FieldToken::parse(&tampered, key).unwrap();
    group.bench_function("tampered_field", |b| {
        b.iter(|| black_box(&parsed).check(&config));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_field_token,
    bench_identity_token,
    bench_rejection
);
criterion_main!(benches);
