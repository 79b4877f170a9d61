//! Single scripted instruction

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::tree::Value;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Kind of tree operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "visualize", serde(rename_all = "lowercase"))]
pub enum OperationKind {
    /// Add a value (duplicates allowed)
    Insert,

    /// Look a value up without mutating
    Search,

    /// Remove the first node holding a value
    Delete,
}

impl OperationKind {
    /// Lowercase keyword used in script text
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Insert => "insert",
            OperationKind::Search => "search",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for OperationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insert" => Ok(OperationKind::Insert),
            "search" => Ok(OperationKind::Search),
            "delete" => Ok(OperationKind::Delete),
            _ => Err(()),
        }
    }
}

/// Immutable scripted step: what to do, with which value, and how long
/// to hold the resulting frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Operation {
    /// Operation kind
    pub kind: OperationKind,

    /// Operand
    pub value: Value,

    /// Hold time before the next step
    pub delay: Duration,
}

impl Operation {
    /// Build an operation with an explicit hold time in milliseconds
    pub fn new(kind: OperationKind, value: Value, delay_ms: u64) -> Self {
        Self {
            kind,
            value,
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// `insert value`
    pub fn insert(value: Value, delay_ms: u64) -> Self {
        Self::new(OperationKind::Insert, value, delay_ms)
    }

    /// `search value`
    pub fn search(value: Value, delay_ms: u64) -> Self {
        Self::new(OperationKind::Search, value, delay_ms)
    }

    /// `delete value`
    pub fn delete(value: Value, delay_ms: u64) -> Self {
        Self::new(OperationKind::Delete, value, delay_ms)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.value, self.delay.as_millis())
    }
}
