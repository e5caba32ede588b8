//! HashSet - An unordered set over the open addressing [`HashTable`]
//!
//! Each element is stored as a key of the table with a unit value. Engine
//! failures never reach the caller, they are folded into `bool` results.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash};
use std::iter::{FromIterator, FusedIterator};
use std::vec;

#[cfg(feature = "serde")]
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, SerializeSeq, Serializer},
};

#[cfg(feature = "serde")]
use crate::utils::SeqCollector;

use crate::error::Error;
use crate::hashtable::iter::IntoIter as TableIntoIter;
use crate::hashtable::{DefaultHashBuilder, HashTable, DEFAULT_MAX_LOAD};

/// The capacity of a set created with [`HashSet::new`].
pub const DEFAULT_SET_CAPACITY: usize = 7;

/// An unordered set of unique elements.
#[derive(Clone)]
pub struct HashSet<T, S = DefaultHashBuilder> {
    table: HashTable<T, (), S>,
}

impl<T> HashSet<T, DefaultHashBuilder> {
    /// Construct a new empty set. The underlying table starts with room for
    /// [`DEFAULT_SET_CAPACITY`] slots, rounded up to a power of two.
    pub fn new() -> Self {
        HashSet {
            table: HashTable::from_parts(
                DEFAULT_SET_CAPACITY,
                DEFAULT_MAX_LOAD,
                DefaultHashBuilder::default(),
            ),
        }
    }

    /// Construct a new empty set with at least `capacity` slots. Fails if
    /// `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        HashTable::with_capacity(capacity).map(HashSet::from_table)
    }
}

impl<T, S: Default> Default for HashSet<T, S> {
    fn default() -> Self {
        HashSet {
            table: HashTable::default(),
        }
    }
}

impl<T, S> HashSet<T, S> {
    /// Wrap an existing table, which becomes the storage of the set.
    pub fn from_table(table: HashTable<T, (), S>) -> Self {
        HashSet { table }
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Determine if the set is currently empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterate over the elements. The elements are gathered into a snapshot
    /// when the iterator is created, in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            snapshot: self.table.keys().collect::<Vec<_>>().into_iter(),
        }
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Add an element that may be absent. Returns true if the element is in
    /// the set after the call. Returns false, leaving the set unchanged, if
    /// the element is `None` or if the table was full and refused to grow.
    pub fn add<E>(&mut self, element: E) -> bool
    where
        E: Into<Option<T>>,
    {
        let element = match element.into() {
            Some(element) => element,
            None => return false,
        };
        // Re-adding never needs room, even in a full table.
        if self.table.contains_key(&element) {
            return true;
        }
        let before = self.table.len();
        match self.table.insert(element, ()) {
            Ok(_) => true,
            // A refused growth after the element was stored still counts.
            Err(_) => self.table.len() > before,
        }
    }

    /// Assert if an element is in the set.
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(element)
    }

    /// Remove an element, returning true if it was present.
    pub fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove(element).is_some()
    }

    /// Check the consistency of the underlying table.
    pub fn verify(&self) -> bool {
        self.table.verify()
    }
}

/// A snapshot iterator over the elements of a [`HashSet`].
pub struct Iter<'a, T> {
    snapshot: vec::IntoIter<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.snapshot.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.snapshot.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// An owning iterator over the elements of a [`HashSet`].
pub struct IntoIter<T> {
    inner: TableIntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> IntoIterator for HashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<T: Debug, S> Debug for HashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.keys()).finish()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::default();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|t| {
            let _ = self.add(t);
        });
    }
}

#[cfg(feature = "serde")]
impl<T, S> Serialize for HashSet<T, S>
where
    T: Serialize,
{
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        let mut state = serializer.serialize_seq(Some(self.len()))?;

        for element in self.table.keys() {
            state.serialize_element(element)?;
        }

        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T, S> Deserialize<'de> for HashSet<T, S>
where
    T: Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SeqCollector::new())
    }
}
