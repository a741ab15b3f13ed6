//! A mutable Binary Search Tree (BST) with explicit, on-demand rebalancing.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! sometimes has child `Node`s. The invariant kept by this crate is:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a value
//!    less than its own value.
//! 2. For every `Node`, all the `Node`s in its right subtree have a value
//!    greater than or equal to its own value. Duplicates always go right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. This tree does not balance itself on insertion,
//! so inserting sorted values produces a chain. Calling [`Tree::make_balanced`]
//! performs one bottom-up pass of single rotations that shortens such chains.
//!
//! ## Layers
//!
//! - [`node`] holds the nodes themselves in a [`Forest`]: insertion placement,
//!   the attach/detach primitives guarding the "one parent per node" rule,
//!   rotations, and the rebalancing pass.
//! - [`tree`] wraps a single root into the [`Tree`] container.
//!
//! # Examples
//!
//! ```
//! use bstree::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert_range([1, 2, 3, 4, 5]);
//! println!("{}", tree.visualize());
//!
//! tree.make_balanced().unwrap();
//! println!("{}", tree.visualize());
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
mod iter;
pub mod node;
pub mod tree;
mod visualize;

#[cfg(test)]
mod test;

pub use error::{AttachmentError, Error, Result, RotationError};
pub use iter::Iter;
pub use node::{Forest, NodeId};
pub use tree::Tree;
