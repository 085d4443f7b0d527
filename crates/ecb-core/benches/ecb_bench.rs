use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::num::NonZeroUsize;

use ecb_core::{encrypt_block, encrypt_ecb, encrypt_ecb_parallel, expand_key, Aes128Key};

fn bench_block(c: &mut Criterion) {
    let key = Aes128Key::from([0u8; 16]);
    let schedule = expand_key(&key);
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);

    let mut group = c.benchmark_group("block");
    group.bench_function("expand_key", |b| {
        b.iter(|| expand_key(&key));
    });
    group.bench_function("encrypt_block", |b| {
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);
        b.iter(|| encrypt_block(&block, &schedule));
    });
    group.finish();
}

fn bench_payload(c: &mut Criterion) {
    let schedule = expand_key(&Aes128Key::from([1u8; 16]));
    let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
    // roughly a 256x256 24-bit bitmap
    let mut payload = vec![0u8; 256 * 256 * 3];
    rng.fill_bytes(&mut payload);

    let mut group = c.benchmark_group("payload");
    group.sample_size(20);
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("ecb_sequential", |b| {
        b.iter(|| encrypt_ecb(&payload, &schedule));
    });
    let workers = NonZeroUsize::new(4).unwrap();
    group.bench_function("ecb_parallel_4", |b| {
        b.iter(|| encrypt_ecb_parallel(&payload, &schedule, workers));
    });
    group.finish();
}

criterion_group!(benches, bench_block, bench_payload);
criterion_main!(benches);
