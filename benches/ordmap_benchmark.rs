// Compares the ordered map against the hash table for the same workloads, and
// sequential against random insertion order, which exercise different
// rotation patterns in the tree.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dualmap::{HashTable, OrderedMap};
use rand::seq::SliceRandom;
use rand::Rng;

const COUNT_MIN: usize = 500;
const COUNT_MAX: usize = 600;

fn random_keys(n: usize) -> Vec<u32> {
    let mut keys: Vec<u32> = (0..n as u32).collect();
    keys.shuffle(&mut rand::rng());
    keys
}

fn count() -> usize {
    rand::rng().random_range(COUNT_MIN..COUNT_MAX)
}

pub fn ordmap_insert_sequential(c: &mut Criterion) {
    c.bench_function("ordmap_insert_sequential", |b| {
        b.iter_batched(
            || (0..count() as u32).collect::<Vec<_>>(),
            |keys| {
                let mut map = OrderedMap::new();
                for k in keys {
                    map.insert(k, ());
                }
                map
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn ordmap_insert_random(c: &mut Criterion) {
    c.bench_function("ordmap_insert_random", |b| {
        b.iter_batched(
            || random_keys(count()),
            |keys| {
                let mut map = OrderedMap::new();
                for k in keys {
                    map.insert(k, ());
                }
                map
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn hashtable_insert_random(c: &mut Criterion) {
    c.bench_function("hashtable_insert_random", |b| {
        b.iter_batched(
            || random_keys(count()),
            |keys| {
                let mut table = HashTable::new();
                for k in keys {
                    let _ = table.insert(k, ());
                }
                table
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn ordmap_remove_random(c: &mut Criterion) {
    c.bench_function("ordmap_remove_random", |b| {
        b.iter_batched(
            || {
                let keys = random_keys(count());
                let map: OrderedMap<u32, ()> = keys.iter().map(|k| (*k, ())).collect();
                (map, random_keys(keys.len()))
            },
            |(mut map, keys)| {
                for k in keys.iter() {
                    map.remove(k);
                }
                map
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn ordmap_search(c: &mut Criterion) {
    c.bench_function("ordmap_search", |b| {
        b.iter_batched(
            || {
                let n = count();
                let map: OrderedMap<u32, ()> = (0..n as u32).map(|k| (k, ())).collect();
                (map, random_keys(n * 4 / 3))
            },
            |(ref map, ref keys)| {
                for k in keys.iter() {
                    black_box(map.get(black_box(k)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn ordmap_iter(c: &mut Criterion) {
    c.bench_function("ordmap_iter", |b| {
        b.iter_batched(
            || random_keys(count()).into_iter().map(|k| (k, k)).collect::<OrderedMap<u32, u32>>(),
            |ref map| map.values().fold(0u64, |acc, v| acc + u64::from(*v)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    insert,
    ordmap_insert_sequential,
    ordmap_insert_random,
    hashtable_insert_random
);
criterion_group!(read, ordmap_remove_random, ordmap_search, ordmap_iter);
criterion_main!(insert, read);
