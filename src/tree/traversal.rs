//! Descent walks and whole-tree traversals
//!
//! Every walk here is read-only. The playback layer replays these
//! walks before mutating, so highlight derivation and the mutation
//! itself always take the same branches.

use super::{Edge, NodeId, SearchTree, Value};

/// Which child a descent step takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Value strictly less than the pivot
    Left,

    /// Value greater than or equal to the pivot
    Right,
}

impl Direction {
    /// Branch taken by `value` at a node holding `pivot`
    #[inline]
    pub fn of(value: Value, pivot: Value) -> Self {
        if value < pivot {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Slot offset used by the layout pass
    #[inline]
    pub fn bit(&self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }
}

/// Result of a search, with the exact traversal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchOutcome {
    /// Visited identities, root first
    pub path: Vec<NodeId>,

    /// First node holding the value, if any
    pub found: Option<NodeId>,
}

impl SearchOutcome {
    /// Search hit
    pub fn is_found(&self) -> bool {
        self.found.is_some()
    }
}

/// Walk an insert takes before attaching
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InsertPath {
    /// Visited identities, root first; the last one becomes the parent
    pub path: Vec<NodeId>,

    /// Free slot the new node lands in (`None`: tree empty, new root)
    pub attach: Option<Direction>,
}

impl InsertPath {
    /// Future parent of the inserted node
    pub fn parent(&self) -> Option<NodeId> {
        self.path.last().copied()
    }
}

impl SearchTree {
    /// Find the first node holding `value`, recording every visited node
    pub fn search(&self, value: Value) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        let mut current = self.root();

        while let Some(id) = current {
            outcome.path.push(id);
            let node = &self[id];
            if value == node.value {
                outcome.found = Some(id);
                break;
            }
            current = match Direction::of(value, node.value) {
                Direction::Left => node.left,
                Direction::Right => node.right,
            };
        }

        outcome
    }

    /// Nodes an insert of `value` would pass through, ending at the parent
    pub fn insert_path(&self, value: Value) -> InsertPath {
        let mut walk = InsertPath::default();
        let mut current = self.root();

        while let Some(id) = current {
            walk.path.push(id);
            let node = &self[id];
            let direction = Direction::of(value, node.value);
            let next = match direction {
                Direction::Left => node.left,
                Direction::Right => node.right,
            };
            if next.is_none() {
                walk.attach = Some(direction);
            }
            current = next;
        }

        walk
    }

    /// Leftmost node of `id`'s right subtree
    pub fn successor_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self[id].right?;
        while let Some(left) = self[current].left {
            current = left;
        }
        Some(current)
    }

    /// Values in sorted (in-order) sequence
    pub fn in_order(&self) -> Vec<Value> {
        let mut values = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root();

        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self[id].left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            values.push(self[id].value);
            current = self[id].right;
        }

        values
    }

    /// Deepest level (root = 0); `None` for an empty tree
    pub fn height(&self) -> Option<usize> {
        let root = self.root()?;
        let mut deepest = 0;
        let mut stack = vec![(root, 0usize)];

        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = &self[id];
            stack.extend(node.left.map(|child| (child, level + 1)));
            stack.extend(node.right.map(|child| (child, level + 1)));
        }

        Some(deepest)
    }

    /// Rebuild `nodes`/`edges` from the root in pre-order (left first)
    pub(super) fn rebuild_collections(&mut self) {
        let mut order = Vec::with_capacity(self.order.len());
        let mut edges = Vec::with_capacity(self.edges.len());
        let mut stack: Vec<(Option<NodeId>, NodeId)> =
            self.root.map(|root| (None, root)).into_iter().collect();

        while let Some((parent, id)) = stack.pop() {
            order.push(id);
            if let Some(from) = parent {
                edges.push(Edge { from, to: id });
            }
            let node = &self[id];
            // right pushed first so the left subtree is emitted first
            stack.extend(node.right.map(|child| (Some(id), child)));
            stack.extend(node.left.map(|child| (Some(id), child)));
        }

        self.order = order;
        self.edges = edges;
    }
}
