//! Binary search tree engine
//!
//! Nodes live in an index-addressed arena; `left`/`right` are
//! optional [`NodeId`]s. Removed nodes leave an empty slot behind so an
//! identity is never handed out twice within one tree lifetime.
//!
//! Besides the topology the tree keeps two derived collections for the
//! renderer: `nodes` (every live node) and `edges` (every parent→child
//! link). Inserts append to both. Deletes rebuild both with a full
//! traversal, because a two-child delete keeps the target's identity
//! under a new value while a different identity (the successor)
//! disappears, and patching the edge list in place for that case is
//! not worth the bookkeeping.

mod layout;
mod node;
mod traversal;

pub use layout::Canvas;
pub use node::{Edge, NodeId, Point, TreeNode, Value};
pub use traversal::{Direction, InsertPath, SearchOutcome};

use std::ops::{Index, IndexMut};

/// What a delete did to the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    /// Node that held the deleted value (survives in the two-child case)
    pub target: Option<NodeId>,

    /// In-order successor whose value was promoted (two-child case only)
    pub successor: Option<NodeId>,

    /// Identity actually unlinked from the tree
    pub removed: Option<NodeId>,
}

impl DeleteOutcome {
    /// Value was absent, tree unchanged
    pub fn is_noop(&self) -> bool {
        self.removed.is_none()
    }
}

/// Arena-backed binary search tree
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    /// Arena; `None` marks a removed node
    slots: Vec<Option<TreeNode>>,

    root: Option<NodeId>,

    /// Derived: all live nodes
    order: Vec<NodeId>,

    /// Derived: all parent→child links
    edges: Vec<Edge>,
}

impl SearchTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the tree has no root
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root identity
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a live node
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Live nodes in collection order
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.order.iter().map(move |&id| &self[id])
    }

    /// Parent→child links
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Drop every node and restart identity allocation
    pub fn clear(&mut self) {
        self.slots.clear();
        self.root = None;
        self.order.clear();
        self.edges.clear();
    }

    /// Insert `value`; ties descend right. Always succeeds.
    pub fn insert(&mut self, value: Value) -> NodeId {
        let walk = self.insert_path(value);

        let id = NodeId(self.slots.len());
        self.slots.push(Some(TreeNode::new(id, value)));
        self.order.push(id);

        match (walk.parent(), walk.attach) {
            (Some(parent), Some(direction)) => {
                match direction {
                    Direction::Left => self[parent].left = Some(id),
                    Direction::Right => self[parent].right = Some(id),
                }
                self.edges.push(Edge {
                    from: parent,
                    to: id,
                });
            }
            _ => self.root = Some(id),
        }

        id
    }

    /// Delete the first node (in descent order) holding `value`
    ///
    /// 1. absent value: no-op
    /// 2. zero or one child: the node is replaced by that child
    /// 3. two children: the in-order successor's value is copied into
    ///    the node and the successor's own slot is unlinked
    pub fn delete(&mut self, value: Value) -> DeleteOutcome {
        let mut outcome = DeleteOutcome::default();

        // link from the parent (or the root) to `current`
        let mut link: Option<(NodeId, Direction)> = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self[id];
            if node.value == value {
                break;
            }
            let direction = Direction::of(value, node.value);
            link = Some((id, direction));
            current = match direction {
                Direction::Left => node.left,
                Direction::Right => node.right,
            };
        }

        let Some(id) = current else {
            return outcome;
        };
        outcome.target = Some(id);

        match (self[id].left, self[id].right) {
            (None, replacement) | (replacement, None) => {
                self.splice(link, replacement);
                self.release(id);
                outcome.removed = Some(id);
            }
            (Some(_), Some(right)) => {
                let successor = self.unlink_min(id, right);
                let promoted = self[successor].value;
                self[id].value = promoted;
                self.release(successor);
                outcome.successor = Some(successor);
                outcome.removed = Some(successor);
            }
        }

        self.rebuild_collections();
        outcome
    }

    /// Detach the leftmost node of the subtree hanging right of `owner`
    fn unlink_min(&mut self, owner: NodeId, right: NodeId) -> NodeId {
        let mut link = (owner, Direction::Right);
        let mut current = right;
        while let Some(left) = self[current].left {
            link = (current, Direction::Left);
            current = left;
        }

        let rest = self[current].right;
        self.splice(Some(link), rest);
        current
    }

    /// Point the link at `child`; `None` is the root link
    fn splice(&mut self, link: Option<(NodeId, Direction)>, child: Option<NodeId>) {
        match link {
            None => self.root = child,
            Some((parent, Direction::Left)) => self[parent].left = child,
            Some((parent, Direction::Right)) => self[parent].right = child,
        }
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            *slot = None;
        }
    }
}

impl Index<NodeId> for SearchTree {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        self.slots[id.0]
            .as_ref()
            .unwrap_or_else(|| panic!("{} is not a live node", id))
    }
}

impl IndexMut<NodeId> for SearchTree {
    fn index_mut(&mut self, id: NodeId) -> &mut TreeNode {
        self.slots[id.0]
            .as_mut()
            .unwrap_or_else(|| panic!("{} is not a live node", id))
    }
}
