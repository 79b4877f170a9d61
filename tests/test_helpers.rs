//! Test helper functions for building and checking trees

#![allow(dead_code)]
use std::collections::HashSet;

use treeplay::tree::{NodeId, SearchTree, Value};
use treeplay::{PlaybackConfig, PlaybackController, Player, Script, VirtualScheduler};

/// Build a tree by inserting `values` in order
pub fn tree_of(values: &[Value]) -> SearchTree {
    let mut tree = SearchTree::new();
    for &v in values {
        tree.insert(v);
    }
    tree
}

/// Values along a path of identities
pub fn path_values(tree: &SearchTree, path: &[NodeId]) -> Vec<Value> {
    path.iter().map(|&id| tree[id].value).collect()
}

/// Check the ordering invariant: left subtree `<` node, right subtree `>=`
pub fn assert_bst(tree: &SearchTree) {
    let mut stack: Vec<(NodeId, Option<Value>, Option<Value>)> =
        tree.root().map(|r| (r, None, None)).into_iter().collect();

    while let Some((id, low, high)) = stack.pop() {
        let node = &tree[id];
        if let Some(low) = low {
            assert!(node.value >= low, "{} violates lower bound {}", node, low);
        }
        if let Some(high) = high {
            assert!(node.value < high, "{} violates upper bound {}", node, high);
        }
        if let Some(left) = node.left {
            stack.push((left, low, Some(node.value)));
        }
        if let Some(right) = node.right {
            stack.push((right, Some(node.value), high));
        }
    }
}

/// Check that the derived node/edge collections match the live topology
pub fn assert_collections_consistent(tree: &SearchTree) {
    let mut reachable = HashSet::new();
    let mut stack: Vec<NodeId> = tree.root().into_iter().collect();
    while let Some(id) = stack.pop() {
        reachable.insert(id);
        stack.extend(tree[id].left);
        stack.extend(tree[id].right);
    }

    let listed: HashSet<NodeId> = tree.nodes().map(|n| n.id).collect();
    assert_eq!(listed, reachable, "node collection out of sync");
    assert_eq!(tree.len(), reachable.len());

    assert_eq!(tree.edges().len(), reachable.len().saturating_sub(1));
    for edge in tree.edges() {
        let parent = &tree[edge.from];
        assert!(
            parent.left == Some(edge.to) || parent.right == Some(edge.to),
            "edge {} does not match a live link",
            edge.key()
        );
    }
}

/// Player on a virtual clock for `script`
pub fn player_for(script: Script) -> Player<VirtualScheduler> {
    let config = PlaybackConfig::default().with_script(script);
    Player::virtual_time(PlaybackController::new(SearchTree::new(), config))
}
