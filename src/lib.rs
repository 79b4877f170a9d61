//! # Scripted binary-search-tree playback
//!
//! Engine behind an animated BST teaching widget: a fixed script of
//! insert/search/delete operations is replayed forever against a live
//! tree, and after every step the crate exposes exactly what a renderer
//! needs to paint the frame.
//!
//! ## Pieces
//!
//! 1. **Tree engine** ([`tree`]): arena-backed BST with insert, search
//!    (with visited path), delete (successor promotion) and a
//!    level/slot layout pass producing canvas coordinates
//! 2. **Script** ([`script`]): immutable operation list with hold times
//! 3. **Scheduler** ([`scheduler`]): injectable "wake me after N ms"
//!    capability, plus a virtual clock for deterministic replay
//! 4. **Playback** ([`playback`]): state machine that applies one
//!    operation per wake-up, derives the pseudo-code highlight and
//!    search/delete paths, and loops back to an empty tree
//!
//! ## Usage Example
//!
//! ```
//! use std::time::Duration;
//! use treeplay::{PlaybackConfig, PlaybackController, Player, SearchTree};
//!
//! let controller = PlaybackController::new(SearchTree::new(), PlaybackConfig::default());
//! let mut player = Player::virtual_time(controller);
//! player.start();
//! player.advance(Duration::from_secs(5));
//!
//! let frame = player.snapshot();
//! assert!(!frame.nodes.is_empty());
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod playback; // Playback state machine and frames
pub mod scheduler; // Wake-up scheduling
pub mod script; // Operation scripts
pub mod tree; // BST engine and layout

// Re-exports for convenience
pub use playback::{Phase, PlaybackController, Player, SearchResult, Snapshot};
pub use scheduler::{Scheduler, TimerId, VirtualScheduler};
pub use script::{Operation, OperationKind, Script};
pub use tree::{Canvas, NodeId, SearchTree, Value};

use std::time::Duration;

use thiserror::Error;

/// Pause between the end of the script and the replay from an empty tree
pub const DEFAULT_RESTART_PAUSE: Duration = Duration::from_millis(3000);

/// Playback configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Operations to replay
    pub script: Script,

    /// Canvas used for layout until the host reports a size
    pub canvas: Canvas,

    /// Pause after the last operation before starting over
    pub restart_pause: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            script: Script::default(),
            canvas: Canvas::default(),
            restart_pause: DEFAULT_RESTART_PAUSE,
        }
    }
}

impl PlaybackConfig {
    /// Replace the script
    pub fn with_script(mut self, script: Script) -> Self {
        self.script = script;
        self
    }

    /// Set the initial canvas; rejects zero, negative or non-finite sizes
    pub fn with_canvas(mut self, width: f64, height: f64) -> Result<Self, PlaybackError> {
        self.canvas =
            Canvas::new(width, height).ok_or(PlaybackError::InvalidCanvas { width, height })?;
        Ok(self)
    }

    /// Set the end-of-script pause
    pub fn with_restart_pause(mut self, pause: Duration) -> Self {
        self.restart_pause = pause;
        self
    }

    /// Virtual time for one full pass including the restart pause
    pub fn loop_duration(&self) -> Duration {
        self.script.duration() + self.restart_pause
    }
}

/// Errors raised while building playback configuration
///
/// Tree and playback operations themselves never fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// Malformed script line
    #[error("invalid script at line {line}: {reason}")]
    InvalidScript {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Script line names an operation that does not exist
    #[error("unknown operation '{kind}' at line {line}")]
    UnknownOperation {
        /// 1-based line number
        line: usize,
        /// Offending keyword
        kind: String,
    },

    /// Canvas size unusable for layout
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.canvas, Canvas::new(500.0, 300.0).unwrap());
        assert_eq!(config.loop_duration(), Duration::from_millis(50_000));
    }

    #[test]
    fn test_invalid_canvas_rejected() {
        let err = PlaybackConfig::default().with_canvas(0.0, 10.0).unwrap_err();
        assert_eq!(err, PlaybackError::InvalidCanvas { width: 0.0, height: 10.0 });
        assert_eq!(err.to_string(), "invalid canvas size 0x10");
    }
}
