//! HashTable - An open addressing hash table
//!
//! Every entry lives directly in a power of two sized array of slots. A key's
//! home slot is its hash modulo the capacity, and collisions are resolved by
//! probing along the triangular sequence `home + i(i+1)/2`, which visits every
//! slot of a power of two table exactly once before repeating. See the
//! `probe` module for the details.
//!
//! Removal does not empty a slot, it marks it as a *tombstone*. A tombstone is
//! skipped by lookups so that keys placed further along the same probe path
//! remain reachable, and is reused by the next insert that passes it.
//! Tombstones are discarded when the table is rehashed.
//!
//! The table grows by doubling when an insert brings the load (live entries
//! over capacity) up to the configured max load. A rehash that would leave the
//! table above the max load, even at the larger size, is refused with
//! [`Error::ResizeRejected`](crate::Error::ResizeRejected).
//!
//! Use a [`HashTableBuilder`] to configure the capacity and max load.

#[macro_use]
mod macros;
pub mod iter;
mod probe;
mod states;

use std::borrow::Borrow;
use std::fmt::{self, Debug, Write};
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FromIterator;
use std::mem;

#[cfg(feature = "serde")]
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, SerializeMap, Serializer},
};

#[cfg(feature = "serde")]
use crate::utils::MapCollector;

use tracing::{debug, trace};

use self::iter::{IntoIter, Iter, KeyIter, ValueIter};
use self::probe::ProbeSeq;
use self::states::{ProbeState, Slot};
use crate::error::Error;
use crate::hashset::HashSet;

/// The hasher used when none is given. Selected by the `foldhash` and `ahash`
/// features, with `foldhash` taking priority.
#[cfg(feature = "foldhash")]
pub type DefaultHashBuilder = foldhash::fast::RandomState;

/// The hasher used when none is given. Selected by the `foldhash` and `ahash`
/// features, with `foldhash` taking priority.
#[cfg(all(feature = "ahash", not(feature = "foldhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// The hasher used when none is given. Selected by the `foldhash` and `ahash`
/// features, with `foldhash` taking priority.
#[cfg(all(not(feature = "ahash"), not(feature = "foldhash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

/// The number of slots a table is created with when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 8;

/// The fraction of occupied slots at which the table grows, unless configured.
/// Growth happens as soon as the load reaches this value, not once it passes
/// it, so a table with a max load of 1.0 doubles when its last slot is taken.
pub const DEFAULT_MAX_LOAD: f64 = 0.5;

fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    debug_assert_pow2!(capacity);
    (0..capacity).map(|_| Slot::Empty).collect()
}

/// A configurable builder to create new hash tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashTableBuilder {
    capacity: Option<usize>,
    max_load: Option<f64>,
}

impl HashTableBuilder {
    /// Create a new builder. Unless configured, the table will have
    /// [`DEFAULT_CAPACITY`] slots and a max load of [`DEFAULT_MAX_LOAD`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a minimum number of slots. The table rounds this up to the
    /// next power of two. A capacity of zero is refused by `build`.
    #[must_use]
    pub fn set_capacity(self, capacity: usize) -> Self {
        HashTableBuilder {
            capacity: Some(capacity),
            max_load: self.max_load,
        }
    }

    /// Set the max load, the fraction of occupied slots in `(0, 1]` that the
    /// table may reach before it grows.
    #[must_use]
    pub fn set_max_load(self, max_load: f64) -> Self {
        HashTableBuilder {
            capacity: self.capacity,
            max_load: Some(max_load),
        }
    }

    /// Consume this builder, returning a table with the default hasher.
    pub fn build<K, V>(self) -> Result<HashTable<K, V>, Error> {
        self.build_with_hasher(DefaultHashBuilder::default())
    }

    /// Consume this builder, returning a table that hashes keys with
    /// `build_hasher`. Fails if the capacity is zero (or too large to round
    /// up to a power of two) or the max load is outside of `(0, 1]`.
    pub fn build_with_hasher<K, V, S>(self, build_hasher: S) -> Result<HashTable<K, V, S>, Error> {
        let HashTableBuilder { capacity, max_load } = self;

        let requested = capacity.unwrap_or(DEFAULT_CAPACITY);
        let capacity = match requested {
            0 => None,
            n => n.checked_next_power_of_two(),
        }
        .ok_or(Error::InvalidCapacity(requested))?;

        let max_load = max_load.unwrap_or(DEFAULT_MAX_LOAD);
        // Written so that NaN is refused as well.
        if !(max_load > 0.0 && max_load <= 1.0) {
            return Err(Error::InvalidMaxLoad(max_load));
        }

        Ok(HashTable::from_parts(capacity, max_load, build_hasher))
    }
}

/// An unordered map using open addressing with tombstones.
///
/// Mutation requires `&mut self`, so a table shared between threads must be
/// wrapped in a lock by the caller.
#[derive(Clone)]
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    slots: Box<[Slot<K, V>]>,
    len: usize,
    max_load: f64,
    // The capacity that `clear` returns to.
    initial_capacity: usize,
    build_hasher: S,
}

impl<K, V> HashTable<K, V, DefaultHashBuilder> {
    /// Construct a new table with [`DEFAULT_CAPACITY`] slots and a max load of
    /// [`DEFAULT_MAX_LOAD`].
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Construct a new table with at least `capacity` slots and the default
    /// max load. Fails if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        HashTableBuilder::new().set_capacity(capacity).build()
    }
}

impl<K, V, S: Default> Default for HashTable<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Construct a new table with the default capacity and max load, hashing
    /// keys with `build_hasher`.
    pub fn with_hasher(build_hasher: S) -> Self {
        HashTable::from_parts(DEFAULT_CAPACITY, DEFAULT_MAX_LOAD, build_hasher)
    }

    // The max load must already be validated.
    pub(crate) fn from_parts(capacity: usize, max_load: f64, build_hasher: S) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        HashTable {
            slots: empty_slots(capacity),
            len: 0,
            max_load,
            initial_capacity: capacity,
            build_hasher,
        }
    }

    /// Returns the number of live entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Determine if the table is currently empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the table. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The configured max load.
    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    /// The current load, live entries over capacity.
    pub fn load(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// A reference to the table's hasher.
    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }

    /// Remove every entry, returning the table to its construction capacity.
    pub fn clear(&mut self) {
        self.slots = empty_slots(self.initial_capacity);
        self.len = 0;
    }

    /// Iterator over `(&K, &V)` in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.len)
    }

    /// Iterator over &K
    pub fn keys(&self) -> KeyIter<'_, K, V> {
        KeyIter::new(self.iter())
    }

    /// Iterator over &V
    pub fn values(&self) -> ValueIter<'_, K, V> {
        ValueIter::new(self.iter())
    }

    /// Collect every live entry in slot order.
    pub fn to_pairs(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    // Walk the probe sequence of `k`. Tombstones never end a scan, but the
    // first one seen is where a missing key should be placed.
    fn probe<Q>(&self, k: &Q, k_hash: u64) -> ProbeState
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut first_tombstone = None;
        for idx in ProbeSeq::new(k_hash, self.slots.len()) {
            match &self.slots[idx] {
                Slot::Empty => return ProbeState::Vacant(first_tombstone.unwrap_or(idx)),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(idx);
                }
                Slot::Occupied(ki, _) => {
                    if k.eq(ki.borrow()) {
                        return ProbeState::Found(idx);
                    }
                }
            }
        }
        first_tombstone.map_or(ProbeState::Full, ProbeState::Vacant)
    }

    fn search<Q>(&self, k: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let k_hash = hash_key!(self, k);
        match self.probe(k, k_hash) {
            ProbeState::Found(idx) => Some(idx),
            _ => None,
        }
    }

    /// Retrieve a value from the table. If the value exists, a reference is
    /// returned as `Some(&V)`, otherwise if not present `None` is returned.
    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.search(k)
            .and_then(|idx| self.slots[idx].entry())
            .map(|(_, v)| v)
    }

    /// Retrieve a mutable reference to a value in the table.
    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.search(k)?;
        self.slots[idx].value_mut()
    }

    /// Assert if a key exists in the table.
    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.search(k).is_some()
    }

    /// Insert a value for a key that may be absent. An absent key is refused
    /// with [`Error::NullKey`] and nothing changes, otherwise this behaves as
    /// [`insert`](Self::insert).
    pub fn put<Q>(&mut self, k: Q, v: V) -> Result<Option<V>, Error>
    where
        Q: Into<Option<K>>,
    {
        match k.into() {
            Some(k) => self.insert(k, v),
            None => Err(Error::NullKey),
        }
    }

    /// Insert or update a value by key. If the key was present, its value is
    /// replaced and the previous value returned as `Ok(Some(V))`.
    ///
    /// A completely full table first attempts to double. If that is refused
    /// the insert is abandoned and [`Error::ResizeRejected`] returned.
    ///
    /// Once a new entry is stored, a table that has reached its max load
    /// doubles. If that growth is refused, [`Error::ResizeRejected`] is
    /// returned *but the new entry remains in the table*.
    pub fn insert(&mut self, k: K, v: V) -> Result<Option<V>, Error> {
        if self.len == self.slots.len() {
            self.rehash(self.slots.len().saturating_mul(2))?;
        }

        let k_hash = hash_key!(self, &k);
        match self.probe(&k, k_hash) {
            ProbeState::Found(idx) => {
                return Ok(self.slots[idx].value_mut().map(|vi| mem::replace(vi, v)));
            }
            ProbeState::Vacant(idx) => {
                self.slots[idx] = Slot::Occupied(k, v);
                self.len += 1;
            }
            ProbeState::Full => {
                return Err(Error::resize_rejected(
                    self.slots.len(),
                    self.len,
                    self.max_load,
                ));
            }
        }

        // Reaching the max load is enough to grow.
        if self.load() >= self.max_load {
            self.rehash(self.slots.len().saturating_mul(2))?;
        }
        Ok(None)
    }

    /// Remove a key if it exists in the table, returning its value. The slot
    /// becomes a tombstone.
    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.search(k)?;
        let (_, v) = self.slots[idx].bury()?;
        self.len -= 1;
        Some(v)
    }

    /// Resize the table to the smallest power of two that is at least
    /// `capacity` (and at least 1), moving every live entry to a fresh slot
    /// array. Tombstones are dropped in the process.
    ///
    /// If the live entries would exceed the max load at the new size, the
    /// table is left untouched and [`Error::ResizeRejected`] returned.
    pub fn rehash(&mut self, capacity: usize) -> Result<(), Error> {
        let capacity = capacity
            .max(1)
            .checked_next_power_of_two()
            .ok_or_else(|| Error::resize_rejected(usize::MAX, self.len, self.max_load))?;

        if self.len as f64 / capacity as f64 > self.max_load {
            debug!(
                capacity,
                len = self.len,
                max_load = self.max_load,
                "rehash rejected"
            );
            return Err(Error::resize_rejected(capacity, self.len, self.max_load));
        }

        trace!(from = self.slots.len(), to = capacity, len = self.len, "rehash");

        // Every key is hashed before any entry moves, so a panicking hasher
        // leaves the table as it was.
        let hashes: Vec<(usize, u64)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.entry().map(|(k, _)| (idx, hash_key!(self, k))))
            .collect();

        let mut slots = empty_slots(capacity);
        for (old_idx, k_hash) in hashes {
            // The fresh array has no tombstones and no duplicates, so the first
            // empty slot on the path is the place.
            match ProbeSeq::new(k_hash, capacity).find(|idx| slots[*idx].is_empty()) {
                Some(idx) => slots[idx] = mem::replace(&mut self.slots[old_idx], Slot::Empty),
                None => unreachable!("rehash target has fewer slots than entries"),
            }
        }
        self.slots = slots;
        Ok(())
    }

    /// Collect the keys of the table into a [`HashSet`] with the same hasher,
    /// capacity and max load.
    pub fn key_set(&self) -> HashSet<K, S>
    where
        K: Clone,
        S: Clone,
    {
        let mut table =
            HashTable::from_parts(self.slots.len(), self.max_load, self.build_hasher.clone());
        for k in self.keys() {
            // Mirrors our own growth, so this can not be refused.
            let _ = table.insert(k.clone(), ());
        }
        HashSet::from_table(table)
    }

    /// Check the internal consistency of the table: the capacity is a power
    /// of two, `len` matches the occupied slots, every key is reachable along
    /// its own probe sequence and no key is stored twice.
    pub fn verify(&self) -> bool {
        if !self.slots.len().is_power_of_two() {
            return false;
        }
        let occupied = self.slots.iter().filter(|s| s.is_occupied()).count();
        if occupied != self.len {
            return false;
        }
        self.slots.iter().enumerate().all(|(idx, slot)| match slot {
            Slot::Occupied(k, _) => self.search(k) == Some(idx),
            _ => true,
        })
    }
}

impl<K: Debug, V: Debug, S> HashTable<K, V, S> {
    /// Render the slot array, one `[index]: <key, value>` line per entry. With
    /// `show_empty` the empty slots and tombstones are listed as well.
    ///
    /// This is a diagnostic aid and not a stable format.
    pub fn dump(&self, show_empty: bool) -> String {
        let mut out = String::new();
        for (idx, slot) in self.slots.iter().enumerate() {
            let _ = match slot {
                Slot::Occupied(k, v) => writeln!(out, "[{}]: <{:?}, {:?}>", idx, k, v),
                Slot::Tombstone if show_empty => writeln!(out, "[{}]: tombstone", idx),
                Slot::Empty if show_empty => writeln!(out, "[{}]: empty", idx),
                _ => Ok(()),
            };
        }
        if out.ends_with('\n') {
            out.pop();
        }
        out
    }
}

impl<K: Debug, V: Debug, S> Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = HashTable::default();
        table.extend(iter);
        table
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(|(k, v)| {
            let _ = self.insert(k, v);
        });
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.slots.into_vec(), self.len)
    }
}

#[cfg(feature = "serde")]
impl<K, V, S> Serialize for HashTable<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        let mut state = serializer.serialize_map(Some(self.len()))?;

        for (key, val) in self.iter() {
            state.serialize_entry(key, val)?;
        }

        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> Deserialize<'de> for HashTable<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapCollector::new())
    }
}
