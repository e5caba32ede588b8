//! Iterators over an [`AvlTree`](super::AvlTree).

use std::collections::VecDeque;
use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::{Link, Node};

// Enough for the path of a balanced tree of several million keys before the
// stack spills to the heap.
const DEFAULT_STACK_ALLOC: usize = 32;

/// An in-order iterator, yielding keys in ascending order.
pub struct Iter<'a, T> {
    stack: SmallVec<[&'a Node<T>; DEFAULT_STACK_ALLOC]>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Iter {
            stack: SmallVec::new(),
            remaining: len,
        };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut work_node: Option<&'a Node<T>>) {
        while let Some(node) = work_node {
            self.stack.push(node);
            work_node = node.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend(node.right());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// An owning in-order iterator. Nodes are dismantled as it advances.
pub struct IntoIter<T> {
    stack: SmallVec<[Box<Node<T>>; DEFAULT_STACK_ALLOC]>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        let mut iter = IntoIter {
            stack: SmallVec::new(),
            remaining: len,
        };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut work_node: Link<T>) {
        while let Some(mut node) = work_node {
            work_node = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        let right = node.right.take();
        self.descend(right);
        self.remaining -= 1;
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// A breadth first walk of the tree shape.
///
/// Each item is the depth of a position, the root being 0, and the node in
/// it. Both children of every node are visited, so an absent child shows up
/// as `None` at the next depth. Children of an absent node are not.
pub struct Levels<'a, T> {
    queue: VecDeque<(usize, Option<&'a Node<T>>)>,
}

impl<'a, T> Levels<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut queue = VecDeque::new();
        if root.is_some() {
            queue.push_back((0, root));
        }
        Levels { queue }
    }
}

impl<'a, T> Iterator for Levels<'a, T> {
    type Item = (usize, Option<&'a Node<T>>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, work_node) = self.queue.pop_front()?;
        if let Some(node) = work_node {
            self.queue.push_back((depth + 1, node.left()));
            self.queue.push_back((depth + 1, node.right()));
        }
        Some((depth, work_node))
    }
}

impl<T> FusedIterator for Levels<'_, T> {}
