//! OrderedSet - A sorted set over the [`AvlTree`]
//!
//! The elements are the keys of the tree. The tree's failures for duplicate
//! and missing elements surface as `bool` results.

use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Write};
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, SerializeSeq, Serializer},
};

#[cfg(feature = "serde")]
use crate::utils::SeqCollector;

pub use crate::avltree::iter::{IntoIter, Iter};

use crate::avltree::iter::Levels;
use crate::avltree::AvlTree;

/// A set of unique elements, kept in ascending order.
#[derive(Clone)]
pub struct OrderedSet<T> {
    tree: AvlTree<T>,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        OrderedSet::new()
    }
}

impl<T> OrderedSet<T> {
    /// Construct a new empty set.
    pub fn new() -> Self {
        OrderedSet {
            tree: AvlTree::new(),
        }
    }

    /// Construct a set holding a single element.
    pub fn with_value(value: T) -> Self {
        OrderedSet {
            tree: AvlTree::with_root(value),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Determine if the set is currently empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The smallest element.
    pub fn find_min(&self) -> Option<&T> {
        self.tree.find_min()
    }

    /// The largest element.
    pub fn find_max(&self) -> Option<&T> {
        self.tree.find_max()
    }

    /// Iterate over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Walk the underlying tree breadth first.
    pub fn levels(&self) -> Levels<'_, T> {
        self.tree.levels()
    }
}

impl<T: Ord> OrderedSet<T> {
    /// Add an element. Returns false if an equal element was already present,
    /// in which case the set is unchanged.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value).is_ok()
    }

    /// Remove an element, returning true if it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value).is_ok()
    }

    /// Remove an element and hand it back, if it was present.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value).ok()
    }

    /// Assert if an element is in the set.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(value)
    }

    /// Retrieve the stored element equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(value)
    }

    /// Check the consistency of the underlying tree.
    pub fn verify(&self) -> bool {
        self.tree.verify()
    }
}

impl<T: Debug> OrderedSet<T> {
    /// Render the underlying tree one level per line. See
    /// [`AvlTree::level_order_string`].
    pub fn level_order_string(&self) -> String {
        self.tree.level_order_string()
    }
}

impl<T: Display> Display for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for (idx, value) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        if !self.is_empty() {
            f.write_char(' ')?;
        }
        f.write_char(']')
    }
}

impl<T: Debug> Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        OrderedSet {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

#[cfg(feature = "serde")]
impl<T: Serialize> Serialize for OrderedSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_seq(Some(self.len()))?;

        for value in self.iter() {
            state.serialize_element(value)?;
        }

        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T> Deserialize<'de> for OrderedSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SeqCollector::new())
    }
}
