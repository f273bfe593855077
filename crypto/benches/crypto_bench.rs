use criterion::{black_box, criterion_group, criterion_main, Criterion};
use netboot_types::NetworkType;

fn pair_from_seed_bench(c: &mut Criterion) {
    c.bench_function("pair_from_seed", |b| {
        b.iter(|| netboot_crypto::pair_from_seed(black_box(&[42u8; 32])))
    });
}

fn check_pair_bench(c: &mut Criterion) {
    let pair = netboot_crypto::pair_from_seed(&[42u8; 32]);

    c.bench_function("check_pair", |b| {
        b.iter(|| netboot_crypto::check_pair(black_box(&pair)))
    });
}

fn derive_address_bench(c: &mut Criterion) {
    let pair = netboot_crypto::pair_from_seed(&[7u8; 32]);

    c.bench_function("derive_address", |b| {
        b.iter(|| netboot_crypto::derive_address(black_box(&pair.public_key), NetworkType::Testnet))
    });
}

fn validate_address_bench(c: &mut Criterion) {
    let account = netboot_crypto::account_from_seed(&[7u8; 32], NetworkType::Testnet);

    c.bench_function("validate_address", |b| {
        b.iter(|| netboot_crypto::validate_address(black_box(&account.address), NetworkType::Testnet))
    });
}

criterion_group!(
    benches,
    pair_from_seed_bench,
    check_pair_bench,
    derive_address_bench,
    validate_address_bench
);
criterion_main!(benches);
