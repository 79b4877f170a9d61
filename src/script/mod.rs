//! Playback script
//!
//! The ordered, fixed list of operations the controller replays.
//! Scripts are configuration: they are built in code or loaded from a
//! small line format, never edited while playing.
//!
//! Text format, one operation per line:
//!
//! ```text
//! # kind value [delay-ms]
//! insert 50 1000
//! search 40
//! ```

mod operation;

pub use operation::{Operation, OperationKind};

use std::fmt;
use std::time::Duration;

use crate::tree::Value;
use crate::PlaybackError;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Hold time used when a script line omits one
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Ordered operation list
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Script {
    operations: Vec<Operation>,
}

impl Script {
    /// Wrap an explicit operation list
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// Script with no operations (controller stays idle)
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Operation at `index`
    pub fn get(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// No operations
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operations in playback order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Sum of every hold time (one pass, excluding the restart pause)
    pub fn duration(&self) -> Duration {
        self.operations.iter().map(|op| op.delay).sum()
    }

    /// Parse the line format described in the module docs
    pub fn parse(text: &str) -> Result<Self, PlaybackError> {
        let mut operations = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let kind_str = fields.next().unwrap_or_default();
            let kind = kind_str
                .parse::<OperationKind>()
                .map_err(|_| PlaybackError::UnknownOperation {
                    line: line_no,
                    kind: kind_str.to_string(),
                })?;

            let value = fields
                .next()
                .ok_or_else(|| PlaybackError::InvalidScript {
                    line: line_no,
                    reason: format!("missing value for {}", kind),
                })?
                .parse::<Value>()
                .map_err(|e| PlaybackError::InvalidScript {
                    line: line_no,
                    reason: format!("invalid value: {}", e),
                })?;

            let delay = match fields.next() {
                Some(ms) => Duration::from_millis(ms.parse::<u64>().map_err(|e| {
                    PlaybackError::InvalidScript {
                        line: line_no,
                        reason: format!("invalid delay '{}': {}", ms, e),
                    }
                })?),
                None => DEFAULT_DELAY,
            };

            if let Some(extra) = fields.next() {
                return Err(PlaybackError::InvalidScript {
                    line: line_no,
                    reason: format!("unexpected trailing field '{}'", extra),
                });
            }

            operations.push(Operation { kind, value, delay });
        }

        Ok(Self::new(operations))
    }
}

impl Default for Script {
    /// The showcase sequence: build a seven-node tree, search a hit and
    /// a miss, delete a two-child node, then insert into the hole
    fn default() -> Self {
        Self::new(vec![
            Operation::insert(50, 1000),
            Operation::insert(30, 1500),
            Operation::insert(70, 2000),
            Operation::insert(20, 2500),
            Operation::insert(40, 3000),
            Operation::insert(60, 3500),
            Operation::insert(80, 4000),
            Operation::search(40, 5000),
            Operation::search(90, 6500),
            Operation::delete(30, 8000),
            Operation::insert(35, 10000),
        ])
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.operations {
            writeln!(f, "{}", op)?;
        }
        Ok(())
    }
}

impl FromIterator<Operation> for Script {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
