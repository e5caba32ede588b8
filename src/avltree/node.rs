//! Nodes of the tree, and the recursive routines that restructure them.
//!
//! Every routine here works on a [`Link`], the owning slot a subtree hangs
//! from. That is either the root of the tree or a child field of a parent,
//! so a rotation can swap the subtree in place without knowing which.

use std::cmp::{self, Ordering};
use std::mem;

use tracing::trace;

use super::states::InsertState;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A single node of an [`AvlTree`](super::AvlTree).
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub(crate) key: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) height: i32,
}

/// The height of a possibly absent subtree. A leaf is 0 and nothing is -1.
#[inline]
pub(crate) fn height<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

impl<T> Node<T> {
    pub(crate) fn leaf(key: T) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// The key held by this node.
    pub fn key(&self) -> &T {
        &self.key
    }

    /// The height of the subtree rooted here.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// True if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    // Positive when the right side is taller.
    #[inline]
    fn balance_factor(&self) -> i32 {
        height(&self.right) - height(&self.left)
    }
}

/// Rotate the subtree left, promoting the right child. When `allow_nested`
/// is set and the right child leans left, that child is first rotated right
/// so the promoted node ends up balanced. The inner rotation is always made
/// with `allow_nested` unset so it cannot cascade.
pub(crate) fn rotate_left<T>(mut node: Box<Node<T>>, allow_nested: bool) -> Box<Node<T>> {
    let mut pivot = match node.right.take() {
        Some(pivot) => pivot,
        None => return node,
    };
    if allow_nested && height(&pivot.left) > height(&pivot.right) {
        trace!("right-left case, rotating the right child first");
        pivot = rotate_right(pivot, false);
    }
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    trace!(height = pivot.height, "rotated left");
    pivot
}

/// The mirror image of [`rotate_left`].
pub(crate) fn rotate_right<T>(mut node: Box<Node<T>>, allow_nested: bool) -> Box<Node<T>> {
    let mut pivot = match node.left.take() {
        Some(pivot) => pivot,
        None => return node,
    };
    if allow_nested && height(&pivot.right) > height(&pivot.left) {
        trace!("left-right case, rotating the left child first");
        pivot = rotate_left(pivot, false);
    }
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    trace!(height = pivot.height, "rotated right");
    pivot
}

/// Refresh the height of a node whose children may have changed, rotating
/// it if they now differ by more than one.
pub(crate) fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    match node.balance_factor() {
        bf if bf > 1 => rotate_left(node, true),
        bf if bf < -1 => rotate_right(node, true),
        _ => node,
    }
}

fn rebalance_link<T>(link: &mut Link<T>) {
    if let Some(node) = link.take() {
        *link = Some(rebalance(node));
    }
}

/// Place `key` below `link`, rebalancing every ancestor on the way back up.
pub(crate) fn insert<T: Ord>(link: &mut Link<T>, key: T) -> InsertState<T> {
    match link {
        None => {
            *link = Some(Node::leaf(key));
            InsertState::Ok
        }
        Some(node) => {
            let state = match key.cmp(&node.key) {
                Ordering::Less => insert(&mut node.left, key),
                Ordering::Greater => insert(&mut node.right, key),
                Ordering::Equal => return InsertState::Duplicate(key),
            };
            // Nothing below changed shape on a duplicate.
            if state.is_ok() {
                rebalance_link(link);
            }
            state
        }
    }
}

/// Unlink the node selected by `cmp` below `link` and hand back its key.
/// `cmp` orders the wanted key against the key of each node visited.
///
/// A node with two children keeps its place in the tree, taking over the key
/// of its in-order successor, which is then unlinked from the right subtree.
pub(crate) fn remove<T, F>(link: &mut Link<T>, cmp: &mut F) -> Option<T>
where
    F: FnMut(&T) -> Ordering,
{
    let node = link.as_mut()?;
    let removed = match cmp(&node.key) {
        Ordering::Less => remove(&mut node.left, cmp)?,
        Ordering::Greater => remove(&mut node.right, cmp)?,
        Ordering::Equal if node.left.is_some() && node.right.is_some() => {
            let successor = take_min(&mut node.right)?;
            mem::replace(&mut node.key, successor)
        }
        Ordering::Equal => {
            // A leaf or a node with a single child. The child, if any, is
            // already balanced and takes the node's place.
            let mut unlinked = link.take()?;
            *link = unlinked.left.take().or(unlinked.right.take());
            return Some(unlinked.key);
        }
    };
    rebalance_link(link);
    Some(removed)
}

// Unlink the leftmost node below `link`, returning its key.
fn take_min<T>(link: &mut Link<T>) -> Option<T> {
    let node = link.as_mut()?;
    if node.left.is_some() {
        let key = take_min(&mut node.left);
        rebalance_link(link);
        key
    } else {
        let mut unlinked = link.take()?;
        *link = unlinked.right.take();
        Some(unlinked.key)
    }
}

/// Walk the subtree checking ordering, balance and recorded heights.
/// Returns the number of nodes seen, or `None` at the first violation.
pub(crate) fn verify<T: Ord>(link: &Link<T>, lower: Option<&T>, upper: Option<&T>) -> Option<usize> {
    let node = match link {
        Some(node) => node,
        None => return Some(0),
    };
    if lower.is_some_and(|l| node.key <= *l) || upper.is_some_and(|u| node.key >= *u) {
        return None;
    }
    if node.height != 1 + cmp::max(height(&node.left), height(&node.right)) {
        return None;
    }
    if node.balance_factor().abs() > 1 {
        return None;
    }
    let left = verify(&node.left, lower, Some(&node.key))?;
    let right = verify(&node.right, Some(&node.key), upper)?;
    Some(left + right + 1)
}
