//! AvlTree - A height balanced binary search tree
//!
//! Keys are kept in order: everything left of a node is smaller, everything
//! right of it is larger. After each insert or remove the heights of the
//! subtrees hanging from any node differ by at most one, which keeps every
//! path from the root within about `1.44 * log2(n)` nodes.
//!
//! A leaf has height 0 and an absent child counts as -1. When an update
//! breaks the balance at a node it is restored by one rotation, or by two
//! when the taller child leans the other way.
//!
//! This is the storage engine behind [`OrderedMap`](crate::OrderedMap) and
//! [`OrderedSet`](crate::OrderedSet), and can be used on its own when keys
//! carry their own payload.

pub mod iter;
mod node;
pub(crate) mod states;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Write};
use std::iter::FromIterator;

use self::iter::{IntoIter, Iter, Levels};
pub use self::node::Node;
use self::node::Link;
use self::states::InsertState;
use crate::error::Error;

/// An AVL balanced binary search tree of unique keys.
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<T> AvlTree<T> {
    /// Construct a new empty tree.
    pub fn new() -> Self {
        AvlTree { root: None, len: 0 }
    }

    /// Construct a tree holding a single key.
    pub fn with_root(key: T) -> Self {
        AvlTree {
            root: Some(Node::leaf(key)),
            len: 1,
        }
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Determine if the tree is currently empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// The height of the tree: -1 when empty, 0 for a lone root.
    pub fn height(&self) -> i32 {
        node::height(&self.root)
    }

    /// The root node, for inspecting the shape of the tree.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// The smallest key.
    pub fn find_min(&self) -> Option<&T> {
        let mut work_node = self.root()?;
        while let Some(left) = work_node.left() {
            work_node = left;
        }
        Some(&work_node.key)
    }

    /// The largest key.
    pub fn find_max(&self) -> Option<&T> {
        let mut work_node = self.root()?;
        while let Some(right) = work_node.right() {
            work_node = right;
        }
        Some(&work_node.key)
    }

    /// Iterate over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root(), self.len)
    }

    /// Walk the tree breadth first. See [`Levels`].
    pub fn levels(&self) -> Levels<'_, T> {
        Levels::new(self.root())
    }
}

impl<T: Ord> AvlTree<T> {
    /// Insert a key. Fails with [`Error::DuplicateKey`] if an equal key is
    /// present, leaving the tree unchanged.
    pub fn insert(&mut self, key: T) -> Result<(), Error> {
        match self.place(key) {
            InsertState::Ok => Ok(()),
            InsertState::Duplicate(_) => Err(Error::DuplicateKey),
        }
    }

    pub(crate) fn place(&mut self, key: T) -> InsertState<T> {
        let state = node::insert(&mut self.root, key);
        if state.is_ok() {
            self.len += 1;
        }
        state
    }

    /// Remove a key and return it. Fails with [`Error::KeyNotFound`] if no
    /// equal key is present.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<T, Error>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_by(|k| key.cmp(k.borrow())).ok_or(Error::KeyNotFound)
    }

    // The `_by` variants order the wanted key against a stored one, letting
    // the ordered containers look up by a part of the stored key.
    pub(crate) fn remove_by<F>(&mut self, mut cmp: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let removed = node::remove(&mut self.root, &mut cmp)?;
        self.len -= 1;
        Some(removed)
    }

    /// Find the stored key equal to `key`. Fails with [`Error::KeyNotFound`]
    /// if there is none.
    pub fn find<Q>(&self, key: &Q) -> Result<&T, Error>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Retrieve the stored key equal to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_by(|k| key.cmp(k.borrow()))
    }

    pub(crate) fn get_by<F>(&self, mut cmp: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut work_node = self.root();
        while let Some(node) = work_node {
            work_node = match cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(&node.key),
            };
        }
        None
    }

    /// Assert if a key is in the tree.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    // Callers must not change how the key orders.
    pub(crate) fn get_mut_by<F>(&mut self, mut cmp: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut work_node = self.root.as_deref_mut();
        while let Some(node) = work_node {
            work_node = match cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.key),
            };
        }
        None
    }

    /// Check the internal consistency of the tree: keys are strictly
    /// ascending, every recorded height is correct, no node is out of
    /// balance and `len` matches the number of nodes.
    pub fn verify(&self) -> bool {
        node::verify(&self.root, None, None) == Some(self.len)
    }
}

impl<T: Debug> AvlTree<T> {
    /// Render the tree one level per line, each position as
    /// `key>>height: h`, or `null` for an absent child.
    ///
    /// This is a diagnostic aid and not a stable format.
    pub fn level_order_string(&self) -> String {
        render_levels(self.levels(), |out, key| write!(out, "{:?}", key))
    }
}

/// Shared by the ordered containers, which render their entries differently.
pub(crate) fn render_levels<'a, T, F>(levels: Levels<'a, T>, mut fmt_key: F) -> String
where
    T: 'a,
    F: FnMut(&mut String, &T) -> fmt::Result,
{
    let mut out = String::new();
    let mut current = None;
    for (depth, work_node) in levels {
        if current == Some(depth) {
            out.push_str(", ");
        } else {
            if current.is_some() {
                out.push('\n');
            }
            current = Some(depth);
        }
        let _ = match work_node {
            Some(node) => fmt_key(&mut out, &node.key)
                .and_then(|_| write!(out, ">>height: {}", node.height)),
            None => out.write_str("null"),
        };
    }
    out
}

impl<T: Debug> Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    /// Keys that are already present are skipped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|key| {
            let _ = self.place(key);
        });
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.len)
    }
}
