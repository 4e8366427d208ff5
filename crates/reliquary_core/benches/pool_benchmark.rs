//! # Pool Churn Benchmark
//!
//! Acquire/release throughput once pools are warm. A warm pool must never
//! call back into the host's `create_instance`.
//!
//! Run with: `cargo bench --package reliquary_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reliquary_core::{PoolRegistry, PrototypeKey, SpawnHost};
use reliquary_shared::{Quaternion, Vec3};

/// Host that does nothing but count.
#[derive(Default)]
struct NullHost {
    next: u32,
}

impl SpawnHost for NullHost {
    type Handle = u32;

    fn create_instance(&mut self, _key: &PrototypeKey) -> u32 {
        self.next += 1;
        self.next
    }

    fn set_active(&mut self, handle: u32, active: bool) {
        black_box((handle, active));
    }

    fn set_placement(&mut self, handle: u32, position: Vec3, rotation: Quaternion) {
        black_box((handle, position, rotation));
    }

    fn apply_impulse(&mut self, handle: u32, impulse: Vec3) {
        black_box((handle, impulse));
    }
}

fn bench_warm_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("warm_churn");

    for burst in [1usize, 8, 64] {
        group.throughput(Throughput::Elements(burst as u64));
        group.bench_with_input(BenchmarkId::from_parameter(burst), &burst, |b, &burst| {
            let mut host = NullHost::default();
            let mut registry = PoolRegistry::new();
            let key = PrototypeKey::new("exp-small");
            let mut live = Vec::with_capacity(burst);

            b.iter(|| {
                for _ in 0..burst {
                    live.push(registry.acquire(&mut host, &key, Vec3::ZERO, Quaternion::IDENTITY));
                }
                for handle in live.drain(..) {
                    black_box(registry.release(&mut host, handle));
                }
            });

            assert!(host.next as usize <= burst, "warm pool created instances");
        });
    }

    group.finish();
}

fn bench_many_keys(c: &mut Criterion) {
    let keys: Vec<PrototypeKey> = ["exp-small", "exp-medium", "exp-big", "health-small", "health-medium", "health-big"]
        .into_iter()
        .map(PrototypeKey::new)
        .collect();

    c.bench_function("six_key_round_robin", |b| {
        let mut host = NullHost::default();
        let mut registry = PoolRegistry::new();
        let mut i = 0usize;

        b.iter(|| {
            let key = &keys[i % keys.len()];
            i = i.wrapping_add(1);
            let handle = registry.acquire(&mut host, key, Vec3::ZERO, Quaternion::IDENTITY);
            black_box(registry.release(&mut host, handle))
        });
    });
}

criterion_group!(benches, bench_warm_churn, bench_many_keys);
criterion_main!(benches);
