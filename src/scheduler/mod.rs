//! Wake-up scheduling
//!
//! The controller never sleeps. It asks a [`Scheduler`] for a wake-up
//! after some delay and gets called back with the matching
//! [`TimerId`]. Hosts decide what "later" means: the bundled
//! [`VirtualScheduler`] keeps a virtual clock so tests and the CLI can
//! fast-forward deterministically.

mod virtual_clock;

pub use virtual_clock::VirtualScheduler;

use std::fmt;
use std::time::Duration;

/// Handle for one scheduled wake-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Wrap a raw id (hosts allocating their own ids)
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// "Invoke after N ms" / "cancel" capability
pub trait Scheduler {
    /// Request a wake-up `delay` from now
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Release a pending wake-up; `false` if it already fired or was
    /// never issued
    fn cancel(&mut self, timer: TimerId) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, timer: TimerId) -> bool {
        (**self).cancel(timer)
    }
}
