//! OrderedMap - A sorted key value map over the [`AvlTree`]
//!
//! Each key and its value are stored together as an [`Entry`] in the tree,
//! ordered by the key alone. Inserting a key that is already present replaces
//! its value, so unlike the bare tree no insert ever fails.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Write};
use std::iter::{FromIterator, FusedIterator};
use std::mem;

#[cfg(feature = "serde")]
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, SerializeMap, Serializer},
};

#[cfg(feature = "serde")]
use crate::utils::MapCollector;

use crate::avltree::iter::{IntoIter as TreeIntoIter, Iter as TreeIter, Levels};
use crate::avltree::states::InsertState;
use crate::avltree::{self, AvlTree};
use crate::error::Error;
use crate::ordset::OrderedSet;

/// A key and its value, as stored in the nodes of an [`OrderedMap`].
///
/// Entries compare by key only.
#[derive(Clone)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    /// The key of the entry.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value of the entry.
    pub fn value(&self) -> &V {
        &self.value
    }

    fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

impl<K: PartialEq, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Entry<K, V> {}

impl<K: Ord, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K: Debug, V: Debug> Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?}, {:?}>", self.key, self.value)
    }
}

impl<K: Display, V: Display> Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.key, self.value)
    }
}

/// A map of unique keys to values, kept in ascending key order.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    tree: AvlTree<Entry<K, V>>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        OrderedMap::new()
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Construct a new empty map.
    pub fn new() -> Self {
        OrderedMap {
            tree: AvlTree::new(),
        }
    }

    /// Construct a map holding a single entry.
    pub fn with_entry(key: K, value: V) -> Self {
        OrderedMap {
            tree: AvlTree::with_root(Entry::new(key, value)),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Determine if the map is currently empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The entry with the smallest key.
    pub fn find_min(&self) -> Option<(&K, &V)> {
        self.tree.find_min().map(Entry::pair)
    }

    /// The entry with the largest key.
    pub fn find_max(&self) -> Option<(&K, &V)> {
        self.tree.find_max().map(Entry::pair)
    }

    /// Iterate over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            iter: self.tree.iter(),
        }
    }

    /// Iterate over the keys in ascending order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate over the values in ascending key order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Walk the underlying tree breadth first.
    pub fn levels(&self) -> Levels<'_, Entry<K, V>> {
        self.tree.levels()
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Insert a key and value. If the key was already present its value is
    /// replaced, and the old value returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.place(Entry::new(key, value)) {
            InsertState::Ok => None,
            InsertState::Duplicate(entry) => self
                .tree
                .get_mut_by(|e| entry.key.cmp(&e.key))
                .map(|e| mem::replace(&mut e.value, entry.value)),
        }
    }

    /// Replace the value of a key that is already present, returning the old
    /// value. Fails with [`Error::KeyNotFound`] if the key is absent, in which
    /// case nothing is inserted.
    pub fn update<Q>(&mut self, key: &Q, value: V) -> Result<V, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key)
            .map(|v| mem::replace(v, value))
            .ok_or(Error::KeyNotFound)
    }

    /// Retrieve the value of a key, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .get_by(|e| key.cmp(e.key.borrow()))
            .map(|e| &e.value)
    }

    /// Retrieve a mutable reference to the value of a key, if present.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .get_mut_by(|e| key.cmp(e.key.borrow()))
            .map(|e| &mut e.value)
    }

    /// Assert if a key is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .remove_by(|e| key.cmp(e.key.borrow()))
            .map(|e| e.value)
    }

    /// Copy the keys out into a new [`OrderedSet`].
    pub fn key_set(&self) -> OrderedSet<K>
    where
        K: Clone,
    {
        self.keys().cloned().collect()
    }

    /// Check the consistency of the underlying tree.
    pub fn verify(&self) -> bool {
        self.tree.verify()
    }
}

impl<K: Debug, V: Debug> OrderedMap<K, V> {
    /// Render the underlying tree one level per line, each position as
    /// `<key, value>>height: h`, or `null` for an absent child.
    pub fn level_order_string(&self) -> String {
        avltree::render_levels(self.levels(), |out, e| write!(out, "{:?}", e))
    }
}

impl<K: Display, V: Display> Display for OrderedMap<K, V> {
    /// Lists the entries in key order, as `[ <k, v>, <k, v> ]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for (idx, entry) in self.tree.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", entry)?;
        }
        if !self.is_empty() {
            f.write_char(' ')?;
        }
        f.write_char(']')
    }
}

impl<K: Debug, V: Debug> Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(|(k, v)| {
            let _ = self.insert(k, v);
        });
    }
}

/// An iterator over `(&K, &V)` in ascending key order.
pub struct Iter<'a, K, V> {
    iter: TreeIter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(Entry::pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An owning iterator over `(K, V)` in ascending key order.
pub struct IntoIter<K, V> {
    iter: TreeIntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|e| (e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

#[cfg(feature = "serde")]
impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_map(Some(self.len()))?;

        for (key, val) in self.iter() {
            state.serialize_entry(key, val)?;
        }

        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapCollector::new())
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;
    use crate::Error;

    #[test]
    fn test_ordmap_basic() {
        let mut map = OrderedMap::new();
        assert!(map.is_empty());
        assert_eq!(map.insert(5, "five"), None);
        assert_eq!(map.insert(3, "three"), None);
        assert_eq!(map.insert(8, "eight"), None);
        assert_eq!(map.len(), 3);

        assert_eq!(map.get(&3), Some(&"three"));
        assert_eq!(map.get(&4), None);
        assert!(map.contains_key(&8));

        assert_eq!(map.remove(&3), Some("three"));
        assert_eq!(map.remove(&3), None);
        assert_eq!(map.len(), 2);
        assert!(map.verify());
    }

    #[test]
    fn test_ordmap_duplicate_insert_updates() {
        let mut map = OrderedMap::with_entry("a".to_string(), 1);
        assert_eq!(map.insert("a".to_string(), 2), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&2));

        assert_eq!(map.update("a", 3), Ok(2));
        assert_eq!(map.update("b", 3), Err(Error::KeyNotFound));
        assert!(!map.contains_key("b"));

        if let Some(v) = map.get_mut("a") {
            *v += 1;
        }
        assert_eq!(map.get("a"), Some(&4));
    }

    #[test]
    fn test_ordmap_remove_two_children_moves_value() {
        let mut map: OrderedMap<u32, String> = [5, 3, 8, 1, 4]
            .into_iter()
            .map(|k| (k, format!("v{}", k)))
            .collect();
        assert_eq!(map.remove(&3), Some("v3".to_string()));
        assert!(map.verify());

        let root = map.tree.root().unwrap();
        let left = root.left().unwrap();
        assert_eq!(left.key().key(), &4);
        assert_eq!(left.key().value(), "v4");
        assert!(left.right().is_none());
    }

    #[test]
    fn test_ordmap_order_and_bounds() {
        let map: OrderedMap<i32, i32> = (0..100).rev().map(|i| (i, i * 10)).collect();
        assert!(map.verify());
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), (0..100).collect::<Vec<_>>());
        assert_eq!(map.values().len(), 100);
        assert_eq!(map.find_min(), Some((&0, &0)));
        assert_eq!(map.find_max(), Some((&99, &990)));

        let keys = map.key_set();
        assert_eq!(keys.len(), 100);
        assert!(keys.contains(&42));

        let owned: Vec<(i32, i32)> = map.into_iter().take(2).collect();
        assert_eq!(owned, vec![(0, 0), (1, 10)]);
    }

    #[test]
    fn test_ordmap_rendering() {
        let mut map: OrderedMap<i32, char> = OrderedMap::new();
        assert_eq!(map.to_string(), "[ ]");
        assert_eq!(map.level_order_string(), "");

        map.insert(2, 'b');
        map.insert(1, 'a');
        map.insert(3, 'c');
        assert_eq!(map.to_string(), "[ <1, a>, <2, b>, <3, c> ]");
        assert_eq!(
            map.level_order_string(),
            "<2, 'b'>>>height: 1\n\
             <1, 'a'>>>height: 0, <3, 'c'>>>height: 0\n\
             null, null, null, null"
        );
        assert_eq!(format!("{:?}", map), "{1: 'a', 2: 'b', 3: 'c'}");
    }

    #[test]
    fn test_ordmap_clear() {
        let mut map: OrderedMap<u8, u8> = (0..10).map(|i| (i, i)).collect();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.find_min(), None);
        assert!(map.verify());
    }
}
