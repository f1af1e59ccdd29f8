use criterion::{Criterion, criterion_group, criterion_main};
use sha2::{Digest, Sha256};
use std::hint::black_box;

pub fn bench_sha256_ref(c: &mut Criterion) {
    c.bench_function("sha256 64 bytes (reference)", |b| {
        b.iter(|| Sha256::digest(black_box(&[0u8; 64])))
    });

    c.bench_function("sha256 4 KiB (reference)", |b| {
        b.iter(|| Sha256::digest(black_box(&[0u8; 4096])))
    });
}

criterion_group!(benches, bench_sha256_ref);
criterion_main!(benches);
