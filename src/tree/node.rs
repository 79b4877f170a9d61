//! Arena-resident tree node
//!
//! Children are arena indices, not references, so the two-child
//! delete can move a value between nodes without aliasing.

use std::fmt;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Key type stored in the tree.
pub type Value = i64;

/// Stable node identity (arena slot index)
///
/// Assigned at creation, independent of the node's value, and never
/// reused until the tree is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Canvas coordinate computed by the layout pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

/// One BST entry
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Identity
    pub id: NodeId,

    /// Key (overwritten in place by successor promotion)
    pub value: Value,

    /// Left child (all values `<` this one)
    pub left: Option<NodeId>,

    /// Right child (all values `>=` this one)
    pub right: Option<NodeId>,

    /// Position, written only by layout
    pub position: Point,
}

impl TreeNode {
    pub(crate) fn new(id: NodeId, value: Value) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
            position: Point::default(),
        }
    }

    /// No children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Both children present
    #[inline]
    pub fn has_two_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.id, self.value)
    }
}

/// Derived parent→child link, used only for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Parent identity
    pub from: NodeId,
    /// Child identity
    pub to: NodeId,
}

impl Edge {
    /// Render key built from both endpoint identities
    pub fn key(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}
