//! Pseudo-code listings and highlight traces
//!
//! Each operation kind shows a short listing. A [`CodeTrace`] is the
//! sequence of listing lines visited while walking the path the
//! mutation is about to take; its last line is the one highlighted.
//! Traces are derived from the tree *before* the operation is applied.

use crate::script::OperationKind;
use crate::tree::{Direction, NodeId, SearchTree, Value};

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Semantic point in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum CodeStep {
    /// Insert into an empty tree
    BecameRoot,
    /// Insert lands in a free left slot
    AttachLeft,
    /// Insert lands in a free right slot
    AttachRight,
    /// Descent continues left
    DescendLeft,
    /// Descent continues right
    DescendRight,
    /// Search hit
    Found,
    /// Search or delete reached an empty link
    NotFound,
    /// Delete target has no left child
    ReplaceWithRight,
    /// Delete target has no right child
    ReplaceWithLeft,
    /// Delete target has two children
    PromoteSuccessor,
}

const INSERT_LINES: &[&str] = &[
    "fn insert(&mut self, value: i64) {",
    "    let node = Node::new({value});",
    "    let Some(mut current) = self.root else {",
    "        self.root = Some(node);",
    "        return;",
    "    };",
    "    loop {",
    "        if value < current.value {",
    "            match current.left {",
    "                None => { current.left = Some(node); return; }",
    "                Some(left) => current = left,",
    "            }",
    "        } else {",
    "            match current.right {",
    "                None => { current.right = Some(node); return; }",
    "                Some(right) => current = right,",
    "            }",
    "        }",
    "    }",
    "}",
];

const INSERT_STEPS: &[(CodeStep, usize)] = &[
    (CodeStep::BecameRoot, 3),
    (CodeStep::AttachLeft, 9),
    (CodeStep::DescendLeft, 10),
    (CodeStep::AttachRight, 14),
    (CodeStep::DescendRight, 15),
];

const SEARCH_LINES: &[&str] = &[
    "fn search(&self, value: i64) -> Option<&Node> {",
    "    let mut current = self.root.as_ref();",
    "    while let Some(node) = current {",
    "        if value == node.value {",
    "            return Some(node); // found",
    "        }",
    "        current = if value < node.value {",
    "            node.left.as_ref()",
    "        } else {",
    "            node.right.as_ref()",
    "        };",
    "    }",
    "    None // not found",
    "}",
];

const SEARCH_STEPS: &[(CodeStep, usize)] = &[
    (CodeStep::Found, 4),
    (CodeStep::DescendLeft, 7),
    (CodeStep::DescendRight, 9),
    (CodeStep::NotFound, 12),
];

const DELETE_LINES: &[&str] = &[
    "fn delete(&mut self, value: i64) {",
    "    self.root = remove(self.root.take(), value);",
    "}",
    "",
    "fn remove(node: Option<Box<Node>>, value: i64) -> Option<Box<Node>> {",
    "    let mut node = node?;",
    "    if value < node.value {",
    "        node.left = remove(node.left.take(), value);",
    "    } else if value > node.value {",
    "        node.right = remove(node.right.take(), value);",
    "    } else {",
    "        match (node.left.take(), node.right.take()) {",
    "            (None, right) => return right,",
    "            (left, None) => return left,",
    "            (Some(left), Some(right)) => {",
    "                node.value = min_value(&right);",
    "                node.left = Some(left);",
    "                node.right = remove(Some(right), node.value);",
    "            }",
    "        }",
    "    }",
    "    Some(node)",
    "}",
];

const DELETE_STEPS: &[(CodeStep, usize)] = &[
    (CodeStep::NotFound, 5),
    (CodeStep::DescendLeft, 7),
    (CodeStep::DescendRight, 9),
    (CodeStep::ReplaceWithRight, 12),
    (CodeStep::ReplaceWithLeft, 13),
    (CodeStep::PromoteSuccessor, 15),
];

/// Listing shown for one operation kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeListing {
    kind: OperationKind,
    lines: Vec<String>,
}

impl CodeListing {
    /// Listing for `kind`, with `value` substituted where the text quotes it
    pub fn for_operation(kind: OperationKind, value: Value) -> Self {
        let template = match kind {
            OperationKind::Insert => INSERT_LINES,
            OperationKind::Search => SEARCH_LINES,
            OperationKind::Delete => DELETE_LINES,
        };
        let lines = template
            .iter()
            .map(|line| line.replace("{value}", &value.to_string()))
            .collect();
        Self { kind, lines }
    }

    /// Operation kind this listing belongs to
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Rendered lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line index for `step`; `None` if the listing has no such step
    pub fn line_of(&self, step: CodeStep) -> Option<usize> {
        let table = match self.kind {
            OperationKind::Insert => INSERT_STEPS,
            OperationKind::Search => SEARCH_STEPS,
            OperationKind::Delete => DELETE_STEPS,
        };
        table
            .iter()
            .find(|(candidate, _)| *candidate == step)
            .map(|&(_, line)| line)
    }
}

/// Lines visited by one operation, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTrace {
    steps: Vec<CodeStep>,
    lines: Vec<usize>,
}

impl CodeTrace {
    fn push(&mut self, listing: &CodeListing, step: CodeStep) {
        if let Some(line) = listing.line_of(step) {
            self.steps.push(step);
            self.lines.push(line);
        }
    }

    /// Semantic steps taken
    pub fn steps(&self) -> &[CodeStep] {
        &self.steps
    }

    /// Line indices visited
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    /// Final (highlighted) line
    pub fn highlighted(&self) -> Option<usize> {
        self.lines.last().copied()
    }
}

fn descend(direction: Direction) -> CodeStep {
    match direction {
        Direction::Left => CodeStep::DescendLeft,
        Direction::Right => CodeStep::DescendRight,
    }
}

/// Trace an insert of `value` into `tree`
pub fn trace_insert(tree: &SearchTree, listing: &CodeListing, value: Value) -> CodeTrace {
    let mut trace = CodeTrace::default();
    let walk = tree.insert_path(value);

    let Some((&parent, passed)) = walk.path.split_last() else {
        trace.push(listing, CodeStep::BecameRoot);
        return trace;
    };
    for &id in passed {
        trace.push(listing, descend(Direction::of(value, tree[id].value)));
    }
    let attach = match Direction::of(value, tree[parent].value) {
        Direction::Left => CodeStep::AttachLeft,
        Direction::Right => CodeStep::AttachRight,
    };
    trace.push(listing, attach);
    trace
}

/// Trace a search for `value`
pub fn trace_search(tree: &SearchTree, listing: &CodeListing, value: Value) -> CodeTrace {
    let mut trace = CodeTrace::default();
    let outcome = tree.search(value);

    for &id in &outcome.path {
        let pivot = tree[id].value;
        if value == pivot {
            trace.push(listing, CodeStep::Found);
        } else {
            trace.push(listing, descend(Direction::of(value, pivot)));
        }
    }
    if !outcome.is_found() {
        trace.push(listing, CodeStep::NotFound);
    }
    trace
}

/// Trace a delete of `value`; also returns the identities the delete
/// will touch (target, then successor for a two-child target)
pub fn trace_delete(
    tree: &SearchTree,
    listing: &CodeListing,
    value: Value,
) -> (CodeTrace, Vec<NodeId>) {
    let mut trace = CodeTrace::default();
    let outcome = tree.search(value);

    let Some(target) = outcome.found else {
        for &id in &outcome.path {
            trace.push(listing, descend(Direction::of(value, tree[id].value)));
        }
        trace.push(listing, CodeStep::NotFound);
        return (trace, Vec::new());
    };

    for &id in &outcome.path[..outcome.path.len() - 1] {
        trace.push(listing, descend(Direction::of(value, tree[id].value)));
    }

    let node = &tree[target];
    let mut involved = vec![target];
    match (node.left, node.right) {
        (None, _) => trace.push(listing, CodeStep::ReplaceWithRight),
        (_, None) => trace.push(listing, CodeStep::ReplaceWithLeft),
        (Some(_), Some(_)) => {
            trace.push(listing, CodeStep::PromoteSuccessor);
            involved.extend(tree.successor_of(target));
        }
    }
    (trace, involved)
}
