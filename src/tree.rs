//! A mutable Binary Search Tree container. This is a thin handle around a [`Forest`] holding the
//! root of a single subtree. Nearly everything is delegated to the node layer; the `Tree` only
//! takes care of the empty tree and of re-anchoring the root when it changes.
//!
//! The tree never balances itself. Insertion order decides the shape until
//! [`Tree::make_balanced`] is called.
//!
//! # Examples
//!
//! ```
//! use bstree::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert_range([5, 3, 8]);
//!
//! assert_eq!(tree.count(), 3);
//! assert!(tree.contains(&3));
//! assert_eq!(tree.visualize(), "5\n|-3\n|-8");
//!
//! assert!(tree.remove(&5));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 8]);
//! ```

use std::fmt;

use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::iter::Iter;
use crate::node::{Forest, NodeId};

/// A Binary Search Tree. Values less than a node go to its left, everything else (including
/// duplicates) goes to its right.
#[derive(Clone, Debug)]
pub struct Tree<T> {
    forest: Forest<T>,
    root: Option<NodeId>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            forest: Forest::new(),
            root: None,
        }
    }

    /// The number of values in the tree. This walks the whole tree rather than reading a cached
    /// counter.
    pub fn count(&self) -> usize {
        self.root.map_or(0, |root| self.forest.weight(root))
    }

    /// Same as [`Tree::count`].
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of levels in the tree, 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.root.map_or(0, |root| self.forest.height(root))
    }

    /// The root node, if any. Use it with [`Tree::forest`] to inspect the tree's shape.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Read-only access to the nodes backing this tree.
    pub fn forest(&self) -> &Forest<T> {
        &self.forest
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        self.root.map(|root| self.forest.value(self.forest.min_node(root)))
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Option<&T> {
        self.root.map(|root| self.forest.value(self.forest.max_node(root)))
    }

    /// Drops every value.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.forest.clear();
        self.root = None;
    }

    /// Lazily walks the tree in order. Each call starts a fresh walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.forest, self.root)
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Inserts `value` as a new leaf. The first value inserted into an empty tree becomes the
    /// root.
    pub fn insert(&mut self, value: T) {
        match self.root {
            Some(root) => {
                self.forest.insert(root, value);
            }
            None => self.root = Some(self.forest.new_node(value)),
        }
    }

    /// Inserts every value of `values` in order. Inserting nothing is a no-op, even on an empty
    /// tree.
    pub fn insert_range<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        match self.root {
            Some(root) => {
                for value in values {
                    self.forest.insert(root, value);
                }
            }
            // `build` only fails when there is nothing to insert.
            None => self.root = self.forest.build(values).ok(),
        }
    }

    /// Removes one occurrence of `value` and returns whether there was one to remove.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert!(tree.remove(&2));
    /// assert!(!tree.remove(&2));
    /// assert_eq!(tree.count(), 2);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes one occurrence of `value` and returns the stored value.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let removed = self.forest.remove(self.root?, value)?;
        self.root = removed.root;
        Some(removed.value)
    }

    /// Whether the tree holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.root.is_some_and(|root| self.forest.contains(root, value))
    }

    /// Rebalances the tree in one bottom-up pass, performing at most one rotation per node. See
    /// [`Forest::make_balanced`] for what this does and does not guarantee.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there is nothing to balance.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = (1..=5).collect();
    /// assert_eq!(tree.height(), 5);
    ///
    /// tree.make_balanced().unwrap();
    /// assert!(tree.height() < 5);
    ///
    /// tree.clear();
    /// assert_eq!(tree.make_balanced(), Err(Error::EmptyTree));
    /// ```
    #[instrument(level = "debug", skip(self))]
    pub fn make_balanced(&mut self) -> Result<()> {
        let root = self.root.ok_or(Error::EmptyTree)?;
        let new_root = self.forest.make_balanced(root)?;
        if new_root != root {
            debug!(height = self.forest.height(new_root), "root replaced");
        }
        self.root = Some(new_root);
        Ok(())
    }
}

impl<T> Tree<T>
where
    T: Clone,
{
    /// Copies every value out in order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Tree<T>
where
    T: fmt::Display,
{
    /// Draws the tree as indented text, or returns an empty string for an empty tree. See
    /// [`Forest::visualize`].
    pub fn visualize(&self) -> String {
        self.root
            .map(|root| self.forest.visualize(root))
            .unwrap_or_default()
    }
}

impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.visualize())
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_range(iter);
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.insert_range(iter);
        tree
    }
}
