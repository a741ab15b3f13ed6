//! Errors surfaced by structural operations on nodes and trees.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when manipulating a tree. None of these are transient: they are
/// all precondition violations reported at the point of the offending call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A node could not be attached as a child.
    #[error("invalid attachment: {0}")]
    InvalidAttachment(#[from] AttachmentError),

    /// A node could not be rotated.
    #[error("invalid rotation: {0}")]
    InvalidRotation(#[from] RotationError),

    /// The operation needs at least one node.
    #[error("tree is empty")]
    EmptyTree,

    /// A tree cannot be built from zero values.
    #[error("cannot build a tree from an empty sequence")]
    EmptyInput,
}

/// Why a `set_left`/`set_right` call was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentError {
    /// The child already hangs off another node and must be detached first.
    #[error("node is already attached to another parent, detach it first")]
    AlreadyAttached,

    /// A node cannot be its own child.
    #[error("a node cannot be its own parent")]
    SelfParent,

    /// Attaching one of the node's own ancestors below it would close a cycle.
    #[error("cannot attach an ancestor as a child")]
    AncestorAsChild,
}

/// Why a `rotate_left`/`rotate_right` call was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationError {
    /// Only subtree roots can be rotated. Detach the node, rotate it, then reattach the result.
    #[error("cannot rotate a node that has a parent, detach it, rotate, then reattach")]
    NotRoot,

    /// Rotating left promotes the right child, so there has to be one.
    #[error("cannot rotate left without a right child")]
    MissingRightChild,

    /// Rotating right promotes the left child, so there has to be one.
    #[error("cannot rotate right without a left child")]
    MissingLeftChild,
}
