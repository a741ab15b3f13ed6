//! Arena-backed BST nodes. Every node lives in a [`Forest`] and is addressed by a copyable
//! [`NodeId`]. A node owns its `left` and `right` children (no other node may point at them) and
//! keeps a non-owning back reference to its parent. That back reference is only ever used to
//! enforce the "at most one parent" rule and for rotation/attach bookkeeping.
//!
//! Detached subtrees are allowed to coexist in the same forest. Moving a subtree around is always
//! a two-step affair: detach it from its current parent, then attach it somewhere else.
//!
//! # Examples
//!
//! ```
//! use bstree::node::Forest;
//!
//! let mut forest = Forest::new();
//! let root = forest.build([2, 1, 3]).unwrap();
//!
//! assert_eq!(forest.weight(root), 3);
//! assert_eq!(forest.height(root), 2);
//!
//! // Rotations hand back the new subtree root. Re-anchoring it is up to the caller.
//! let root = forest.rotate_left(root).unwrap();
//! assert_eq!(forest.value(root), &3);
//! assert_eq!(forest.iter(root).copied().collect::<Vec<_>>(), [1, 2, 3]);
//! ```

use std::cmp::Ordering;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::error::{AttachmentError, Error, Result, RotationError};
use crate::iter::Iter;

/// A handle to a node inside a [`Forest`]. Handles stay valid until the node is removed from its
/// forest. Using a stale handle, or one from another forest, panics just like indexing a slice
/// out of bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

/// A single node: a value plus the links to its neighbours.
#[derive(Clone, Debug)]
pub struct Node<T> {
    value: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The node this one hangs off, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Which child slot of a node an operation works on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Values strictly less than the pivot go left, everything else (ties included) goes right.
    fn route<T: Ord>(value: &T, pivot: &T) -> Self {
        if value < pivot {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// The outcome of a successful [`Forest::remove`].
#[derive(Debug, PartialEq, Eq)]
pub struct Removed<T> {
    /// The value that was taken out of the subtree.
    pub value: T,
    /// The root of the subtree after the removal. This only differs from the root that was passed
    /// in when that very node was removed, and is `None` when the subtree is now empty.
    pub root: Option<NodeId>,
}

/// Storage for any number of (possibly detached) binary search subtrees.
#[derive(Clone, Debug)]
pub struct Forest<T> {
    nodes: Arena<Node<T>>,
}

impl<T> Default for Forest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Forest<T> {
    /// Generates a new, empty `Forest`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
        }
    }

    /// The number of nodes stored, across all subtrees.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node. All previously handed out ids become stale.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Looks up a node, returning `None` for stale ids instead of panicking.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Creates a new detached leaf holding `value`.
    pub fn new_node(&mut self, value: T) -> NodeId {
        NodeId(self.nodes.insert(Node::new(value)))
    }

    /// Creates a new node holding `value` and attaches the given subtrees as its children. The
    /// children must be detached (or absent).
    ///
    /// Note that this does not check the BST ordering of the given subtrees.
    pub fn with_children(
        &mut self,
        left: Option<NodeId>,
        right: Option<NodeId>,
        value: T,
    ) -> Result<NodeId> {
        for child in [left, right].into_iter().flatten() {
            if self.nodes[child.0].parent.is_some() {
                return Err(AttachmentError::AlreadyAttached.into());
            }
        }
        if left.is_some() && left == right {
            // Both slots would own the same subtree.
            return Err(AttachmentError::AlreadyAttached.into());
        }

        let id = self.new_node(value);
        self.set_left(id, left)?;
        self.set_right(id, right)?;
        Ok(id)
    }

    /// The value stored at `id`.
    pub fn value(&self, id: NodeId) -> &T {
        &self.nodes[id.0].value
    }

    /// The left child of `id`.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].left
    }

    /// The right child of `id`.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].right
    }

    /// The parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Whether `id` is the root of its subtree, i.e. it has no parent.
    pub fn is_root(&self, id: NodeId) -> bool {
        self.parent(id).is_none()
    }

    /// Attaches `child` as the left subtree of `id`. Passing `None` detaches the current left
    /// child. Attaching a node that already is the child of `id` does nothing.
    ///
    /// Any subtree previously held in the left slot is detached (but stays in the forest).
    ///
    /// # Errors
    ///
    /// [`AttachmentError::AlreadyAttached`] if `child` belongs to another node,
    /// [`AttachmentError::SelfParent`] if `child` is `id` itself and
    /// [`AttachmentError::AncestorAsChild`] if `child` is one of `id`'s ancestors.
    pub fn set_left(&mut self, id: NodeId, child: Option<NodeId>) -> Result<()> {
        self.set_child(id, Side::Left, child)
    }

    /// Attaches `child` as the right subtree of `id`. See [`Forest::set_left`].
    pub fn set_right(&mut self, id: NodeId, child: Option<NodeId>) -> Result<()> {
        self.set_child(id, Side::Right, child)
    }

    /// Detaches the left subtree of `id` and returns its root. The subtree stays in the forest as
    /// a detached subtree.
    pub fn detach_left(&mut self, id: NodeId) -> Option<NodeId> {
        self.detach(id, Side::Left)
    }

    /// Detaches the right subtree of `id` and returns its root.
    pub fn detach_right(&mut self, id: NodeId) -> Option<NodeId> {
        self.detach(id, Side::Right)
    }

    /// The leftmost node under `id`, which is `id` itself if it has no left child.
    pub fn min_node(&self, id: NodeId) -> NodeId {
        self.extremum(id, Side::Left)
    }

    /// The rightmost node under `id`, which is `id` itself if it has no right child.
    pub fn max_node(&self, id: NodeId) -> NodeId {
        self.extremum(id, Side::Right)
    }

    /// Rotate `id` to the left. This moves the right child up vertically and `id` down vertically.
    /// Returns the new subtree root which the caller is responsible for re-anchoring.
    ///
    /// # Errors
    ///
    /// [`RotationError::NotRoot`] if `id` has a parent and [`RotationError::MissingRightChild`]
    /// if there is nothing to promote.
    ///
    /// # Diagram
    ///
    /// ```text
    ///   old_root                      new_root
    ///    /     \                      /     \
    ///   x    new_root   rotate ->  old_root  z
    ///          / \                  /  \
    ///         y   z                x    y
    /// ```
    pub fn rotate_left(&mut self, id: NodeId) -> Result<NodeId> {
        self.rotate(id, Side::Right)
    }

    /// Rotate `id` to the right. This moves the left child up vertically and `id` down vertically.
    ///
    /// # Errors
    ///
    /// [`RotationError::NotRoot`] if `id` has a parent and [`RotationError::MissingLeftChild`]
    /// if there is nothing to promote.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      old_root                new_root
    ///       /     \                /     \
    ///   new_root   z   rotate ->  x    old_root
    ///    / \                             /  \
    ///   x   y                           y    z
    /// ```
    pub fn rotate_right(&mut self, id: NodeId) -> Result<NodeId> {
        self.rotate(id, Side::Left)
    }

    /// The number of nodes in the subtree rooted at `id`. This walks the whole subtree.
    pub fn weight(&self, id: NodeId) -> usize {
        let mut weight = 0;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            weight += 1;
            stack.extend(node.left);
            stack.extend(node.right);
        }

        weight
    }

    /// How many levels are in the subtree rooted at `id`. A node with no children has a height of
    /// 1. This walks the whole subtree.
    pub fn height(&self, id: NodeId) -> usize {
        let mut height = 0;
        let mut stack = vec![(id, 1)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0];
            height = height.max(depth);
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }

        height
    }

    /// Lazily walks the subtree rooted at `id` in order.
    pub fn iter(&self, id: NodeId) -> Iter<'_, T> {
        Iter::new(self, Some(id))
    }

    /// Detaches `id` from its parent (if any) and drops it together with everything below it.
    /// Returns how many nodes were dropped.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        if let Some(parent) = self.parent(id) {
            let side = self.side_of(parent, id);
            self.detach(parent, side);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id.0) {
                removed += 1;
                stack.extend(node.left);
                stack.extend(node.right);
            }
        }

        removed
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left(id),
            Side::Right => self.right(id),
        }
    }

    fn slot_mut(&mut self, id: NodeId, side: Side) -> &mut Option<NodeId> {
        let node = &mut self.nodes[id.0];
        match side {
            Side::Left => &mut node.left,
            Side::Right => &mut node.right,
        }
    }

    /// Which slot of `parent` holds `child`. `child` must be a child of `parent`.
    fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self.left(parent) == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) -> Result<()> {
        let Some(child) = child else {
            self.detach(id, side);
            return Ok(());
        };

        if child == id {
            return Err(AttachmentError::SelfParent.into());
        }
        match self.parent(child) {
            Some(parent) if parent == id => return Ok(()),
            Some(_) => return Err(AttachmentError::AlreadyAttached.into()),
            None => {}
        }
        if self.is_ancestor(child, id) {
            return Err(AttachmentError::AncestorAsChild.into());
        }

        self.detach(id, side);
        self.link(id, side, child);
        Ok(())
    }

    /// Whether `ancestor` lies on the path from `id` up to its root.
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }

        false
    }

    /// Installs `child` into the empty `side` slot of `id` without any checks.
    fn link(&mut self, id: NodeId, side: Side, child: NodeId) {
        debug_assert!(self.child(id, side).is_none());
        debug_assert!(self.parent(child).is_none());

        self.nodes[child.0].parent = Some(id);
        *self.slot_mut(id, side) = Some(child);
    }

    #[instrument(level = "trace", skip(self))]
    fn detach(&mut self, id: NodeId, side: Side) -> Option<NodeId> {
        let child = self.slot_mut(id, side).take()?;
        self.nodes[child.0].parent = None;
        Some(child)
    }

    fn extremum(&self, id: NodeId, side: Side) -> NodeId {
        let mut current = id;
        while let Some(next) = self.child(current, side) {
            current = next;
        }

        current
    }

    /// Promotes the child on side `up` to be the subtree root. The promoted node's child on the
    /// opposite side (the "mover") becomes `id`'s new child on side `up`.
    #[instrument(level = "trace", skip(self))]
    fn rotate(&mut self, id: NodeId, up: Side) -> Result<NodeId> {
        if !self.is_root(id) {
            return Err(RotationError::NotRoot.into());
        }
        let new_root = self.detach(id, up).ok_or(match up {
            Side::Left => RotationError::MissingLeftChild,
            Side::Right => RotationError::MissingRightChild,
        })?;

        let mover = self.detach(new_root, up.opposite());
        self.set_child(id, up, mover)?;
        self.set_child(new_root, up.opposite(), Some(id))?;

        Ok(new_root)
    }
}

impl<T> Forest<T>
where
    T: Ord,
{
    /// Builds a new subtree out of `values`. The first value becomes the root and the rest are
    /// inserted one by one in order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] if `values` is empty.
    pub fn build<I>(&mut self, values: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = T>,
    {
        let mut values = values.into_iter();
        let root = self.new_node(values.next().ok_or(Error::EmptyInput)?);
        for value in values {
            self.insert(root, value);
        }

        Ok(root)
    }

    /// Inserts `value` into the subtree rooted at `id` as a new leaf and returns the leaf. Values
    /// less than a node's value go left, everything else goes right, so duplicates end up to the
    /// right of their equals. No rebalancing happens.
    pub fn insert(&mut self, id: NodeId, value: T) -> NodeId {
        let mut current = id;
        loop {
            let side = Side::route(&value, self.value(current));
            match self.child(current, side) {
                Some(child) => current = child,
                None => {
                    let leaf = self.new_node(value);
                    self.link(current, side, leaf);
                    return leaf;
                }
            }
        }
    }

    /// Finds the first node holding a value equal to `value` along its search path.
    pub fn find(&self, id: NodeId, value: &T) -> Option<NodeId> {
        let mut current = id;
        loop {
            let node = &self.nodes[current.0];
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left?,
                Ordering::Equal => return Some(current),
                Ordering::Greater => node.right?,
            };
        }
    }

    /// Whether the subtree rooted at `id` holds a value equal to `value`.
    pub fn contains(&self, id: NodeId, value: &T) -> bool {
        self.find(id, value).is_some()
    }

    /// Removes one occurrence of `value` from the subtree rooted at `id` and returns it along with
    /// the root of the remaining subtree. Returns `None` if no node holds `value`.
    ///
    /// A node with two children swaps its value with its in-order successor (the smallest node of
    /// its right subtree) and the successor's node is unlinked instead. Since the successor is
    /// the smallest of everything to the right, equal values still end up on the right.
    #[instrument(level = "trace", skip(self, value))]
    pub fn remove(&mut self, id: NodeId, value: &T) -> Option<Removed<T>> {
        let target = self.find(id, value)?;
        let unlinked = match (self.left(target), self.right(target)) {
            (Some(_), Some(right)) => {
                let successor = self.min_node(right);
                if let (Some(a), Some(b)) = self.nodes.get2_mut(target.0, successor.0) {
                    std::mem::swap(&mut a.value, &mut b.value);
                }
                successor
            }
            _ => target,
        };

        let root = self.splice_out(id, unlinked);
        self.nodes
            .remove(unlinked.0)
            .map(|node| Removed { value: node.value, root })
    }

    /// Unlinks `id`, which has at most one child, from the subtree rooted at `root` by promoting
    /// its child into its place. Returns the root of the subtree afterwards.
    fn splice_out(&mut self, root: NodeId, id: NodeId) -> Option<NodeId> {
        debug_assert!(self.left(id).is_none() || self.right(id).is_none());

        let child = self
            .detach(id, Side::Left)
            .or_else(|| self.detach(id, Side::Right));
        if let Some(parent) = self.parent(id) {
            let side = self.side_of(parent, id);
            self.detach(parent, side);
            if let Some(child) = child {
                self.link(parent, side, child);
            }
        }

        if id == root {
            child
        } else {
            Some(root)
        }
    }

    /// Rebalances the subtree rooted at `id` and returns its new root.
    ///
    /// Children are balanced first (each is detached, balanced, and reattached). Then, if one side
    /// of `id` is more than one level taller than the other, a single rotation towards the
    /// shorter side is performed. This is one corrective step per level, not a full AVL
    /// rebalance: the result is not guaranteed to be height balanced everywhere.
    ///
    /// # Errors
    ///
    /// [`RotationError::NotRoot`] if `id` has a parent and needs a rotation.
    #[instrument(level = "trace", skip(self))]
    pub fn make_balanced(&mut self, id: NodeId) -> Result<NodeId> {
        if let Some(left) = self.detach_left(id) {
            let left = self.make_balanced(left)?;
            self.set_left(id, Some(left))?;
        }
        if let Some(right) = self.detach_right(id) {
            let right = self.make_balanced(right)?;
            self.set_right(id, Some(right))?;
        }

        let left_height = self.left(id).map_or(0, |left| self.height(left));
        let right_height = self.right(id).map_or(0, |right| self.height(right));
        if left_height > right_height + 1 {
            trace!(?id, left_height, right_height, "left side too tall");
            self.rotate_right(id)
        } else if right_height > left_height + 1 {
            trace!(?id, left_height, right_height, "right side too tall");
            self.rotate_left(id)
        } else {
            Ok(id)
        }
    }
}
