//! Read-only frame handed to the renderer

use std::fmt;

use crate::script::Operation;
use crate::tree::{NodeId, Value};

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Outcome of the search currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "visualize", serde(rename_all = "kebab-case"))]
pub enum SearchResult {
    /// No search on screen
    #[default]
    None,
    /// Last path element holds the searched value
    Found,
    /// Search ran off the tree
    NotFound,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchResult::None => "none",
            SearchResult::Found => "found",
            SearchResult::NotFound => "not-found",
        })
    }
}

/// Positioned node
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct NodeView {
    /// Identity
    pub id: NodeId,
    /// Key
    pub value: Value,
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

/// Parent→child link
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct EdgeView {
    /// Render key
    pub id: String,
    /// Parent identity
    pub from: NodeId,
    /// Child identity
    pub to: NodeId,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Snapshot {
    /// Index of the operation on screen
    pub operation_index: usize,
    /// Operation on screen (`None` while idle or restarting)
    pub operation: Option<Operation>,
    /// Positioned nodes
    pub nodes: Vec<NodeView>,
    /// Links between them
    pub edges: Vec<EdgeView>,
    /// Highlighted line of `code_lines`
    pub highlighted_line: Option<usize>,
    /// Pseudo-code listing
    pub code_lines: Vec<String>,
    /// Every line visited on the way to `highlighted_line`
    pub trace: Vec<usize>,
    /// Nodes visited by the current search
    pub search_path: Vec<NodeId>,
    /// Outcome of the current search
    pub search_result: SearchResult,
    /// Nodes touched by the current delete
    pub delete_path: Vec<NodeId>,
}

impl Snapshot {
    /// Node is on the current search path
    pub fn is_on_search_path(&self, id: NodeId) -> bool {
        self.search_path.contains(&id)
    }

    /// Node is the successful end of the current search
    pub fn is_search_target(&self, id: NodeId) -> bool {
        self.search_result == SearchResult::Found && self.search_path.last() == Some(&id)
    }

    /// Node is involved in the current delete
    pub fn is_delete_target(&self, id: NodeId) -> bool {
        self.delete_path.contains(&id)
    }

    /// Both endpoints of `edge` lie on the current search path
    pub fn edge_on_search_path(&self, edge: &EdgeView) -> bool {
        self.is_on_search_path(edge.from) && self.is_on_search_path(edge.to)
    }

    /// Look a node up by identity
    pub fn node(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Digest of every field, exact down to coordinate bits
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.operation_index as u64).to_le_bytes());
        if let Some(op) = &self.operation {
            hasher.update(op.to_string().as_bytes());
        }
        for node in &self.nodes {
            hasher.update(&(node.id.index() as u64).to_le_bytes());
            hasher.update(&node.value.to_le_bytes());
            hasher.update(&node.x.to_bits().to_le_bytes());
            hasher.update(&node.y.to_bits().to_le_bytes());
        }
        for edge in &self.edges {
            hasher.update(edge.id.as_bytes());
        }
        hasher.update(&self.highlighted_line.map_or(u64::MAX, |l| l as u64).to_le_bytes());
        for line in &self.code_lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        for &line in &self.trace {
            hasher.update(&(line as u64).to_le_bytes());
        }
        for id in self.search_path.iter().chain(&self.delete_path) {
            hasher.update(&(id.index() as u64).to_le_bytes());
        }
        hasher.update(self.search_result.to_string().as_bytes());
        hasher.finalize()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operation {
            Some(op) => writeln!(f, "step {}: {} {}", self.operation_index, op.kind, op.value)?,
            None => writeln!(f, "step {}: (idle)", self.operation_index)?,
        }

        for (idx, line) in self.code_lines.iter().enumerate() {
            let marker = if self.highlighted_line == Some(idx) { '>' } else { ' ' };
            writeln!(f, "{} {:>3} {}", marker, idx + 1, line)?;
        }

        write!(f, "nodes:")?;
        for node in &self.nodes {
            let tag = if self.is_search_target(node.id) {
                "*"
            } else if self.is_delete_target(node.id) {
                "x"
            } else if self.is_on_search_path(node.id) {
                "~"
            } else {
                ""
            };
            write!(f, " {}{}@({:.1},{:.1})", node.value, tag, node.x, node.y)?;
        }
        writeln!(f)?;

        if self.search_result != SearchResult::None {
            writeln!(f, "search: {} via {} node(s)", self.search_result, self.search_path.len())?;
        }
        if !self.delete_path.is_empty() {
            let ids: Vec<String> = self.delete_path.iter().map(|id| id.to_string()).collect();
            writeln!(f, "delete: {}", ids.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Snapshot {
        Snapshot {
            nodes: vec![
                NodeView { id: NodeId(0), value: 50, x: 250.0, y: 100.0 },
                NodeView { id: NodeId(1), value: 30, x: 125.0, y: 200.0 },
            ],
            edges: vec![EdgeView {
                id: "node-0-node-1".into(),
                from: NodeId(0),
                to: NodeId(1),
            }],
            search_path: vec![NodeId(0), NodeId(1)],
            search_result: SearchResult::Found,
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_render_helpers() {
        let snap = frame();
        assert!(snap.is_search_target(NodeId(1)));
        assert!(!snap.is_search_target(NodeId(0)));
        assert!(snap.is_on_search_path(NodeId(0)));
        assert!(snap.edge_on_search_path(&snap.edges[0]));
        assert!(!snap.is_delete_target(NodeId(1)));
    }

    #[test]
    fn test_fingerprint_sees_coordinates() {
        let a = frame();
        let mut b = frame();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.nodes[1].x += f64::EPSILON * 128.0;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
