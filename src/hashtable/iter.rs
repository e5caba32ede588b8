//! Iterators over a [`HashTable`](super::HashTable). All of them walk the
//! slot array in index order and skip empty slots and tombstones.

use std::iter::FusedIterator;
use std::slice;
use std::vec;

use super::states::Slot;

/// An iterator over `(&K, &V)` in slot order.
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(slots: &'a [Slot<K, V>], len: usize) -> Self {
        Iter {
            slots: slots.iter(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    /// Yield the next key value reference, or `None` if exhausted.
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.slots.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the keys of a table.
pub struct KeyIter<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> KeyIter<'a, K, V> {
    pub(crate) fn new(iter: Iter<'a, K, V>) -> Self {
        KeyIter { iter }
    }
}

impl<'a, K, V> Iterator for KeyIter<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for KeyIter<'_, K, V> {}

/// An iterator over the values of a table.
pub struct ValueIter<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> ValueIter<'a, K, V> {
    pub(crate) fn new(iter: Iter<'a, K, V>) -> Self {
        ValueIter { iter }
    }
}

impl<'a, K, V> Iterator for ValueIter<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValueIter<'_, K, V> {}

/// An owning iterator over `(K, V)` in slot order.
pub struct IntoIter<K, V> {
    slots: vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(slots: Vec<Slot<K, V>>, len: usize) -> Self {
        IntoIter {
            slots: slots.into_iter(),
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.slots.by_ref().find_map(Slot::into_entry)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
