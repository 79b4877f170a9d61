//! Playback controller
//!
//! Replays a [`Script`] against an owned [`SearchTree`], one operation
//! per wake-up, and keeps the presentation state for the frame on
//! screen.
//!
//! ```text
//!   Idle ──start──▶ Applying ──▶ Holding ──timer──▶ Advancing ──▶ Applying ...
//!                                                       │
//!                                        last step done ▼
//!                                   Applying ◀──timer── Restarting
//! ```
//!
//! Applying is one uninterrupted unit: derive the code trace from the
//! untouched tree, mutate, lay out, record path state, then schedule
//! the hold. At most one wake-up is outstanding at any time; a wake-up
//! whose id does not match it is ignored.

mod code;
mod player;
mod snapshot;

pub use code::{trace_delete, trace_insert, trace_search, CodeListing, CodeStep, CodeTrace};
pub use player::Player;
pub use snapshot::{EdgeView, NodeView, SearchResult, Snapshot};

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::scheduler::{Scheduler, TimerId};
use crate::script::{Operation, OperationKind, Script};
use crate::tree::{Canvas, NodeId, SearchTree};
use crate::PlaybackConfig;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not playing (never started, empty script, or torn down)
    Idle,
    /// Applying the current operation
    Applying,
    /// Showing the result of the current operation
    Holding,
    /// Clearing transient state and moving to the next operation
    Advancing,
    /// Pausing after the last operation before replaying from an empty tree
    Restarting,
}

impl Phase {
    /// Legal successor phases
    pub fn can_transition_to(&self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (*self, next),
            (_, Idle)
                | (Idle, Applying)
                | (Applying, Holding)
                | (Holding, Advancing)
                | (Advancing, Applying)
                | (Advancing, Restarting)
                | (Restarting, Applying)
        )
    }
}

/// Transient per-operation presentation state
#[derive(Debug, Clone, Default)]
struct Frame {
    operation: Option<Operation>,
    listing: Option<CodeListing>,
    trace: CodeTrace,
    search_path: Vec<NodeId>,
    search_result: SearchResult,
    delete_path: Vec<NodeId>,
}

impl Frame {
    /// Drop path/result state; the listing stays until the next step
    fn clear_transient(&mut self) {
        self.search_path.clear();
        self.search_result = SearchResult::None;
        self.delete_path.clear();
    }
}

/// Scripted BST playback state machine
#[derive(Debug)]
pub struct PlaybackController {
    tree: SearchTree,
    script: Script,
    canvas: Canvas,
    restart_pause: Duration,
    phase: Phase,
    index: usize,
    pending: Option<TimerId>,
    frame: Frame,
}

impl PlaybackController {
    /// Controller over an explicitly owned tree
    pub fn new(tree: SearchTree, config: PlaybackConfig) -> Self {
        Self {
            tree,
            script: config.script,
            canvas: config.canvas,
            restart_pause: config.restart_pause,
            phase: Phase::Idle,
            index: 0,
            pending: None,
            frame: Frame::default(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the operation on screen
    pub fn operation_index(&self) -> usize {
        self.index
    }

    /// Script being replayed
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Tree state
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Canvas used by the last layout
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Outstanding wake-up, if any
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }

    /// Begin playback from an empty tree
    ///
    /// Returns `false` (and schedules nothing) when already running or
    /// when the script is empty.
    pub fn start<S: Scheduler>(&mut self, scheduler: &mut S) -> bool {
        if self.phase != Phase::Idle || self.pending.is_some() {
            warn!(phase = ?self.phase, "start ignored: playback already running");
            return false;
        }
        if self.script.is_empty() {
            debug!("empty script, staying idle");
            return false;
        }

        self.reset();
        self.apply_current(scheduler);
        true
    }

    /// Handle a wake-up
    ///
    /// Returns `false` for timers this controller is not waiting on.
    pub fn on_timer<S: Scheduler>(&mut self, timer: TimerId, scheduler: &mut S) -> bool {
        if self.pending != Some(timer) {
            warn!(%timer, expected = ?self.pending, "ignoring stale wake-up");
            return false;
        }
        self.pending = None;

        match self.phase {
            Phase::Holding => self.advance(scheduler),
            Phase::Restarting => {
                info!("replaying script from an empty tree");
                self.reset();
                self.apply_current(scheduler);
            }
            other => {
                warn!(phase = ?other, "wake-up in unexpected phase");
                return false;
            }
        }
        true
    }

    /// Recompute layout for a new canvas size; topology is untouched
    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> bool {
        let Some(canvas) = Canvas::new(width, height) else {
            warn!(width, height, "ignoring unusable canvas size");
            return false;
        };
        self.canvas = canvas;
        self.tree.layout(canvas);
        true
    }

    /// Cancel any pending wake-up and go idle
    ///
    /// Returns `true` if a wake-up was released.
    pub fn shutdown<S: Scheduler>(&mut self, scheduler: &mut S) -> bool {
        let released = match self.pending.take() {
            Some(timer) => scheduler.cancel(timer),
            None => false,
        };
        if self.phase != Phase::Idle {
            self.transition(Phase::Idle);
        }
        released
    }

    /// Frame for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let nodes = self
            .tree
            .nodes()
            .map(|node| NodeView {
                id: node.id,
                value: node.value,
                x: node.position.x,
                y: node.position.y,
            })
            .collect();
        let edges = self
            .tree
            .edges()
            .iter()
            .map(|edge| EdgeView {
                id: edge.key(),
                from: edge.from,
                to: edge.to,
            })
            .collect();

        Snapshot {
            operation_index: self.index,
            operation: self.frame.operation,
            nodes,
            edges,
            highlighted_line: self.frame.trace.highlighted(),
            code_lines: self
                .frame
                .listing
                .as_ref()
                .map(|listing| listing.lines().to_vec())
                .unwrap_or_default(),
            trace: self.frame.trace.lines().to_vec(),
            search_path: self.frame.search_path.clone(),
            search_result: self.frame.search_result,
            delete_path: self.frame.delete_path.clone(),
        }
    }

    fn transition(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!(from = ?self.phase, to = ?next, index = self.index, "phase");
        self.phase = next;
    }

    fn reset(&mut self) {
        self.tree.clear();
        self.index = 0;
        self.frame = Frame::default();
    }

    fn advance<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.transition(Phase::Advancing);
        self.frame.clear_transient();
        self.index += 1;

        if self.index < self.script.len() {
            self.apply_current(scheduler);
        } else {
            self.transition(Phase::Restarting);
            self.frame.operation = None;
            info!(pause_ms = self.restart_pause.as_millis() as u64, "script complete");
            self.pending = Some(scheduler.schedule(self.restart_pause));
        }
    }

    fn apply_current<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.transition(Phase::Applying);
        let Some(&op) = self.script.get(self.index) else {
            self.transition(Phase::Idle);
            return;
        };
        debug!(index = self.index, kind = %op.kind, value = op.value, "applying");

        let listing = CodeListing::for_operation(op.kind, op.value);
        let mut frame = Frame {
            operation: Some(op),
            ..Frame::default()
        };

        match op.kind {
            OperationKind::Insert => {
                frame.trace = trace_insert(&self.tree, &listing, op.value);
                self.tree.insert(op.value);
            }
            OperationKind::Search => {
                frame.trace = trace_search(&self.tree, &listing, op.value);
                let outcome = self.tree.search(op.value);
                frame.search_result = if outcome.is_found() {
                    SearchResult::Found
                } else {
                    SearchResult::NotFound
                };
                frame.search_path = outcome.path;
            }
            OperationKind::Delete => {
                let (trace, planned) = trace_delete(&self.tree, &listing, op.value);
                frame.trace = trace;
                let outcome = self.tree.delete(op.value);
                frame.delete_path = outcome.target.into_iter().chain(outcome.successor).collect();
                debug_assert_eq!(frame.delete_path, planned, "delete diverged from its trace");
            }
        }
        frame.listing = Some(listing);
        self.frame = frame;

        self.tree.layout(self.canvas);

        self.transition(Phase::Holding);
        self.pending = Some(scheduler.schedule(op.delay));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::VirtualScheduler;

    fn controller(script: Script) -> PlaybackController {
        PlaybackController::new(SearchTree::new(), PlaybackConfig::default().with_script(script))
    }

    #[test]
    fn test_phase_graph() {
        assert!(Phase::Idle.can_transition_to(Phase::Applying));
        assert!(Phase::Holding.can_transition_to(Phase::Idle));
        assert!(!Phase::Idle.can_transition_to(Phase::Holding));
        assert!(!Phase::Restarting.can_transition_to(Phase::Advancing));
    }

    #[test]
    fn test_start_applies_first_step_and_schedules_hold() {
        let mut clock = VirtualScheduler::new();
        let mut ctl = controller(Script::default());

        assert!(ctl.start(&mut clock));
        assert_eq!(ctl.phase(), Phase::Holding);
        assert_eq!(ctl.tree().len(), 1);
        assert_eq!(clock.next_due(), Some(Duration::from_millis(1000)));
        assert_eq!(ctl.snapshot().highlighted_line, Some(3));
    }

    #[test]
    fn test_double_start_is_refused() {
        let mut clock = VirtualScheduler::new();
        let mut ctl = controller(Script::default());
        assert!(ctl.start(&mut clock));
        assert!(!ctl.start(&mut clock));
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn test_empty_script_idles() {
        let mut clock = VirtualScheduler::new();
        let mut ctl = controller(Script::empty());
        assert!(!ctl.start(&mut clock));
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut clock = VirtualScheduler::new();
        let mut ctl = controller(Script::default());
        ctl.start(&mut clock);

        let stray = clock.schedule(Duration::from_millis(1));
        assert!(!ctl.on_timer(stray, &mut clock));
        assert_eq!(ctl.operation_index(), 0);
        assert_eq!(ctl.phase(), Phase::Holding);
    }

    #[test]
    fn test_resize_relayouts_without_mutation() {
        let mut clock = VirtualScheduler::new();
        let mut ctl = controller(Script::default());
        ctl.start(&mut clock);

        assert!(ctl.set_canvas_size(1000.0, 600.0));
        let root = ctl.snapshot().nodes[0].clone();
        assert_eq!((root.x, root.y), (500.0, 300.0));

        assert!(!ctl.set_canvas_size(0.0, 600.0));
        assert_eq!(ctl.snapshot().nodes[0], root);
        assert_eq!(ctl.tree().len(), 1);
    }

    #[test]
    fn test_shutdown_releases_pending() {
        let mut clock = VirtualScheduler::new();
        let mut ctl = controller(Script::default());
        ctl.start(&mut clock);

        assert!(ctl.shutdown(&mut clock));
        assert_eq!(clock.pending(), 0);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(!ctl.shutdown(&mut clock));
    }
}
