use std::iter::FusedIterator;

use crate::node::{Forest, NodeId};

/// A lazy in-order walk over a subtree: left subtree, then the node itself, then the right
/// subtree. Values come out in non-decreasing order.
///
/// Only the path down to the next value is kept on the stack, so stopping early costs nothing.
pub struct Iter<'a, T> {
    forest: &'a Forest<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(forest: &'a Forest<T>, root: Option<NodeId>) -> Self {
        let mut iter = Self {
            forest,
            stack: Vec::new(),
        };
        if let Some(root) = root {
            iter.push_left_spine(root);
        }

        iter
    }

    /// Pushes `id` and all of its leftmost descendants.
    fn push_left_spine(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            self.stack.push(id);
            current = self.forest.left(id);
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            forest: self.forest,
            stack: self.stack.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let forest = self.forest;
        let id = self.stack.pop()?;
        if let Some(right) = forest.right(id) {
            self.push_left_spine(right);
        }

        Some(forest.value(id))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
