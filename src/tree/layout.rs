//! Level/slot layout
//!
//! Each node gets `(level, slot)`: root is `(0, 0)`, a child is
//! `(level + 1, 2 * slot + bit)` with bit 0 for left and 1 for right.
//! Then
//!
//!   x = width / 2^level * (slot + 0.5)
//!   y = height / (max_level + 2) * (level + 1)
//!
//! Distinct slots on one level can never share an x, and y grows with
//! depth. The price is exponential horizontal spread for deep skewed
//! trees. Slots are `f64`: exact up to 53 levels, past that neighbouring
//! slots start to round together. Past level 1023 `2^level` overflows,
//! and nodes that deep get a non-finite `x` (`y` stays finite). That
//! ceiling is accepted, not fixed.

use super::{Direction, NodeId, Point, SearchTree};

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Drawable area handed to the layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Canvas {
    width: f64,
    height: f64,
}

impl Canvas {
    /// Validated canvas; `None` for zero, negative or non-finite sizes
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let valid = |d: f64| d.is_finite() && d > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    /// Width in canvas units
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in canvas units
    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 300.0,
        }
    }
}

impl SearchTree {
    /// Recompute every node position for a `width` × `height` canvas
    ///
    /// Returns `false` and leaves positions untouched when the size is
    /// unusable. Topology is never modified.
    pub fn calculate_positions(&mut self, width: f64, height: f64) -> bool {
        match Canvas::new(width, height) {
            Some(canvas) => {
                self.layout(canvas);
                true
            }
            None => false,
        }
    }

    /// Layout against an already validated canvas
    pub fn layout(&mut self, canvas: Canvas) {
        let Some(root) = self.root() else {
            return;
        };

        let mut placements: Vec<(NodeId, usize, f64)> = Vec::with_capacity(self.len());
        let mut max_level = 0;
        let mut stack = vec![(root, 0usize, 0.0f64)];

        while let Some((id, level, slot)) = stack.pop() {
            placements.push((id, level, slot));
            max_level = max_level.max(level);
            let node = &self[id];
            let children = [(node.left, Direction::Left), (node.right, Direction::Right)];
            for (child, direction) in children {
                if let Some(child) = child {
                    stack.push((child, level + 1, slot * 2.0 + f64::from(direction.bit())));
                }
            }
        }

        let vertical_spacing = canvas.height / (max_level + 2) as f64;
        for (id, level, slot) in placements {
            let horizontal_spacing = canvas.width / 2f64.powi(level as i32);
            self[id].position = Point {
                x: horizontal_spacing * (slot + 0.5),
                y: vertical_spacing * (level + 1) as f64,
            };
        }
    }
}
