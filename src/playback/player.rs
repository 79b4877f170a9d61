//! Controller bundled with the scheduler that wakes it
//!
//! Dropping a [`Player`] tears playback down: the outstanding wake-up
//! is cancelled so nothing fires into a discarded view.

use std::time::Duration;

use super::{PlaybackController, Snapshot};
use crate::scheduler::{Scheduler, TimerId, VirtualScheduler};

/// Owns a controller and its scheduler
#[derive(Debug)]
pub struct Player<S: Scheduler> {
    controller: PlaybackController,
    scheduler: S,
}

impl<S: Scheduler> Player<S> {
    /// Pair a controller with a scheduler (playback not started)
    pub fn new(controller: PlaybackController, scheduler: S) -> Self {
        Self {
            controller,
            scheduler,
        }
    }

    /// Start playback; see [`PlaybackController::start`]
    pub fn start(&mut self) -> bool {
        self.controller.start(&mut self.scheduler)
    }

    /// Deliver a wake-up from the host
    pub fn fire(&mut self, timer: TimerId) -> bool {
        self.controller.on_timer(timer, &mut self.scheduler)
    }

    /// Forward a canvas resize
    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> bool {
        self.controller.set_canvas_size(width, height)
    }

    /// Current frame
    pub fn snapshot(&self) -> Snapshot {
        self.controller.snapshot()
    }

    /// Controller
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Scheduler
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: Scheduler> Drop for Player<S> {
    fn drop(&mut self) {
        self.controller.shutdown(&mut self.scheduler);
    }
}

impl Player<VirtualScheduler> {
    /// Player on a fresh virtual clock
    pub fn virtual_time(controller: PlaybackController) -> Self {
        Self::new(controller, VirtualScheduler::new())
    }

    /// Jump to the next wake-up and deliver it; `false` if none pending
    pub fn step(&mut self) -> bool {
        let Some(due) = self.scheduler.next_due() else {
            return false;
        };
        match self.scheduler.pop_due(due) {
            Some(timer) => self.fire(timer),
            None => false,
        }
    }

    /// Let `by` of virtual time pass, delivering every wake-up that
    /// falls due on the way (including ones scheduled meanwhile)
    ///
    /// Returns the number of wake-ups delivered.
    pub fn advance(&mut self, by: Duration) -> usize {
        let deadline = self.scheduler.now() + by;
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            if self.fire(timer) {
                fired += 1;
            }
        }
        self.scheduler.advance_to(deadline);
        fired
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{Operation, Script};
    use crate::tree::SearchTree;
    use crate::PlaybackConfig;

    fn player(script: Script) -> Player<VirtualScheduler> {
        let config = PlaybackConfig::default().with_script(script);
        Player::virtual_time(PlaybackController::new(SearchTree::new(), config))
    }

    #[test]
    fn test_advance_fires_due_steps_only() {
        let mut p = player(Script::new(vec![
            Operation::insert(1, 100),
            Operation::insert(2, 100),
            Operation::insert(3, 100),
        ]));
        p.start();

        assert_eq!(p.advance(Duration::from_millis(150)), 1);
        assert_eq!(p.controller().operation_index(), 1);
        assert_eq!(p.advance(Duration::from_millis(50)), 1);
        assert_eq!(p.controller().tree().len(), 3);
    }

    #[test]
    fn test_drop_cancels_wakeup() {
        let mut clock = VirtualScheduler::new();
        {
            let config = PlaybackConfig::default();
            let ctl = PlaybackController::new(SearchTree::new(), config);
            let mut p = Player::new(ctl, &mut clock);
            assert!(p.start());
        }
        assert_eq!(clock.pending(), 0);
    }
}
