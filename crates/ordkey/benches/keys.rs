use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ordkey::{pack, pack_many, unpack, unpack_many, Key};

fn typical_key() -> Key {
    Key::new().push("user").push(182_733_991i64).push("profile")
}

fn bench_pack(c: &mut Criterion) {
    let key = typical_key();
    c.bench_function("pack_single", |b| {
        b.iter(|| pack(b"idx:", &key).unwrap());
    });
}

fn bench_unpack(c: &mut Criterion) {
    let key = typical_key();
    let bytes = pack(b"idx:", &key).unwrap();
    c.bench_function("unpack_single", |b| {
        b.iter(|| unpack(b"idx:", &bytes).unwrap());
    });
}

fn bench_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    for size in [16usize, 256] {
        let keys: Vec<Key> = (0..size as i64)
            .map(|i| Key::new().push("order").push(i))
            .collect();
        let bytes = pack_many(b"b:", &keys).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("pack_many", size), &keys, |b, keys| {
            b.iter(|| pack_many(b"b:", keys).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("unpack_many", size), &bytes, |b, bytes| {
            b.iter(|| unpack_many(b"b:", bytes).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pack, bench_unpack, bench_batches);
criterion_main!(benches);
