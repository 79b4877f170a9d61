//! Deterministic virtual clock
//!
//! Pending timers are ordered by (due time, issue order), so two
//! wake-ups due at the same instant fire in the order they were
//! requested.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{Scheduler, TimerId};

/// Scheduler driven by an explicit, manually advanced clock
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, u64), TimerId>,
}

impl VirtualScheduler {
    /// Clock at zero, nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of outstanding wake-ups
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest outstanding wake-up
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|&(due, _)| due)
    }

    /// Remove and return the earliest wake-up due at or before
    /// `deadline`, moving the clock to its due time
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        let (&(due, seq), _) = self.pending.iter().next()?;
        if due > deadline {
            return None;
        }
        let timer = self.pending.remove(&(due, seq))?;
        self.now = self.now.max(due);
        Some(timer)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        let timer = TimerId(id);
        self.pending.insert((self.now + delay, id), timer);
        timer
    }

    fn cancel(&mut self, timer: TimerId) -> bool {
        let key = self
            .pending
            .iter()
            .find(|(_, &pending)| pending == timer)
            .map(|(&key, _)| key);
        match key {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }
}
