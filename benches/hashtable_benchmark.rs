// Each benchmark measures only the operation in its name. Inputs are built in
// the setup closure of Bencher::iter_batched, which is not timed.
// Counts are drawn from small ranges rather than fixed, so that no single table
// size is favoured by the capacity doubling.
// Values are either empty or a 42 word struct, which shows the cost of moving
// entries during a rehash and of handing values back on remove.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dualmap::HashTable;
use rand::seq::SliceRandom;
use rand::Rng;

// MINs are inclusive, MAXes exclusive.
const INSERT_COUNT_MIN: usize = 120;
const INSERT_COUNT_MAX: usize = 140;
const INSERT_COUNT_FOR_REMOVE_MIN: usize = 340;
const INSERT_COUNT_FOR_REMOVE_MAX: usize = 360;
const REMOVE_COUNT_MIN: usize = 120;
const REMOVE_COUNT_MAX: usize = 140;
const INSERT_COUNT_FOR_SEARCH_MIN: usize = 120;
const INSERT_COUNT_FOR_SEARCH_MAX: usize = 140;
const SEARCH_COUNT_MIN: usize = 120;
const SEARCH_COUNT_MAX: usize = 140;
// Searches draw keys from a range 4/3 the size of the table, so about a
// quarter of them miss.
const SEARCH_SIZE_NUMERATOR: usize = 4;
const SEARCH_SIZE_DENOMINATOR: usize = 3;

pub fn insert_empty_value(c: &mut Criterion) {
    c.bench_function("hashtable_insert_empty_value", |b| {
        b.iter_batched(
            || prepare_insert(()),
            |(mut table, list)| insert_vec(&mut table, list),
            BatchSize::SmallInput,
        )
    });
}

pub fn insert_struct_value(c: &mut Criterion) {
    c.bench_function("hashtable_insert_struct_value", |b| {
        b.iter_batched(
            || prepare_insert(Struct::default()),
            |(mut table, list)| insert_vec(&mut table, list),
            BatchSize::SmallInput,
        )
    });
}

pub fn insert_presized(c: &mut Criterion) {
    c.bench_function("hashtable_insert_presized", |b| {
        b.iter_batched(
            || {
                let (_, list) = prepare_insert(());
                let table = HashTable::with_capacity(INSERT_COUNT_MAX * 4).unwrap();
                (table, list)
            },
            |(mut table, list)| insert_vec(&mut table, list),
            BatchSize::SmallInput,
        )
    });
}

pub fn remove_empty_value(c: &mut Criterion) {
    c.bench_function("hashtable_remove_empty_value", |b| {
        b.iter_batched(
            || prepare_remove(()),
            |(ref mut table, ref list)| remove_vec(table, list),
            BatchSize::SmallInput,
        )
    });
}

pub fn remove_struct_value(c: &mut Criterion) {
    c.bench_function("hashtable_remove_struct_value", |b| {
        b.iter_batched(
            || prepare_remove(Struct::default()),
            |(ref mut table, ref list)| remove_vec(table, list),
            BatchSize::SmallInput,
        )
    });
}

pub fn search_empty_value(c: &mut Criterion) {
    c.bench_function("hashtable_search_empty_value", |b| {
        b.iter_batched(
            || prepare_search(()),
            |(ref table, ref list)| search_vec(table, list),
            BatchSize::SmallInput,
        )
    });
}

pub fn search_after_churn(c: &mut Criterion) {
    // Half the table removed and put back, so probes walk past tombstones.
    c.bench_function("hashtable_search_after_churn", |b| {
        b.iter_batched(
            || {
                let (mut table, list) = prepare_search(());
                let keys: Vec<u32> = table.keys().copied().step_by(2).collect();
                remove_vec(&mut table, &keys);
                (table, list)
            },
            |(ref table, ref list)| search_vec(table, list),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    insert,
    insert_empty_value,
    insert_struct_value,
    insert_presized
);
criterion_group!(remove, remove_empty_value, remove_struct_value);
criterion_group!(search, search_empty_value, search_after_churn);
criterion_main!(insert, remove, search);

// Utility functions:

fn insert_vec<V>(table: &mut HashTable<u32, V>, list: Vec<(u32, V)>) {
    for (key, val) in list.into_iter() {
        let _ = table.insert(key, val);
    }
}

fn remove_vec<V>(table: &mut HashTable<u32, V>, list: &[u32]) {
    for i in list.iter() {
        table.remove(i);
    }
}

fn search_vec<V>(table: &HashTable<u32, V>, list: &[u32]) {
    for i in list.iter() {
        black_box(table.get(black_box(i)));
    }
}

#[derive(Default, Clone)]
#[allow(dead_code)]
struct Struct {
    head: [i64; 32],
    tail: [i64; 10],
}

fn prepare_insert<V: Clone>(value: V) -> (HashTable<u32, V>, Vec<(u32, V)>) {
    let mut rng = rand::rng();
    let count = rng.random_range(INSERT_COUNT_MIN..INSERT_COUNT_MAX);
    let list = (0..count)
        .map(|_| {
            (
                rng.random_range(0..INSERT_COUNT_MAX << 8) as u32,
                value.clone(),
            )
        })
        .collect();
    (HashTable::new(), list)
}

fn prepare_remove<V: Clone>(value: V) -> (HashTable<u32, V>, Vec<u32>) {
    let mut rng = rand::rng();
    let insert_count = rng.random_range(INSERT_COUNT_FOR_REMOVE_MIN..INSERT_COUNT_FOR_REMOVE_MAX);
    let remove_count = rng.random_range(REMOVE_COUNT_MIN..REMOVE_COUNT_MAX);
    let mut table = HashTable::new();
    for i in random_order(insert_count, insert_count) {
        let _ = table.insert(i, value.clone());
    }
    (table, random_order(insert_count, remove_count))
}

fn prepare_search<V: Clone>(value: V) -> (HashTable<u32, V>, Vec<u32>) {
    let mut rng = rand::rng();
    let insert_count = rng.random_range(INSERT_COUNT_FOR_SEARCH_MIN..INSERT_COUNT_FOR_SEARCH_MAX);
    let search_limit = insert_count * SEARCH_SIZE_NUMERATOR / SEARCH_SIZE_DENOMINATOR;
    let search_count = rng.random_range(SEARCH_COUNT_MIN..SEARCH_COUNT_MAX);

    let mut table = HashTable::new();
    for k in 0..insert_count {
        let _ = table.insert(k as u32, value.clone());
    }

    let list = (0..search_count)
        .map(|_| rng.random_range(0..search_limit as u32))
        .collect();
    (table, list)
}

/// Returns `n` distinct numbers from `[0, up_to)` in random order.
fn random_order(up_to: usize, n: usize) -> Vec<u32> {
    let mut order: Vec<u32> = (0..up_to as u32).collect();
    order.shuffle(&mut rand::rng());
    order.truncate(n);
    order
}
