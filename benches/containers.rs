use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use javu::{HashMap, PriorityQueue, TreeMap};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_hash_insert(c: &mut Criterion) {
    c.bench_function("hash_map_insert_10k", |b| {
        b.iter_batched(
            HashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.put(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_hash_get_hit(c: &mut Criterion) {
    c.bench_function("hash_map_get_hit", |b| {
        let mut m: HashMap<String, u64> = HashMap::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.put(k.clone(), i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_hash_get_miss(c: &mut Criterion) {
    c.bench_function("hash_map_get_miss", |b| {
        let mut m: HashMap<String, u64> = HashMap::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.put(key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // keys from a disjoint stream, overwhelmingly absent
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

fn bench_tree_insert_walk(c: &mut Criterion) {
    c.bench_function("tree_map_insert_walk_10k", |b| {
        b.iter_batched(
            TreeMap::<u64, u64>::new,
            |mut m| {
                for (i, x) in lcg(3).take(10_000).enumerate() {
                    m.put(x, i as u64);
                }
                let mut sum = 0u64;
                for (k, _) in m.entries() {
                    sum = sum.wrapping_add(*k);
                }
                black_box((m, sum))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_heap_offer_poll(c: &mut Criterion) {
    c.bench_function("priority_queue_offer_poll_10k", |b| {
        b.iter_batched(
            PriorityQueue::<u64>::new,
            |mut q| {
                for x in lcg(5).take(10_000) {
                    q.offer(x);
                }
                let mut out = 0u64;
                while let Some(v) = q.poll() {
                    out = out.wrapping_add(v);
                }
                black_box(out)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_hash_insert, bench_hash_get_hit, bench_hash_get_miss,
        bench_tree_insert_walk, bench_heap_offer_poll
}
criterion_main!(benches);
