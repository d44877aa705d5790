//! Single-flight refresh gate and the mount flag.
//!
//! At most one refresh runs per page. A timer tick that finds a refresh in
//! flight (or a dialog open) is skipped; the next tick tries again. A user
//! refresh during a flight is remembered and run once the flight lands, so
//! any number of clicks collapse into a single re-run.

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Flight {
    #[default]
    Idle,
    Running,
    RerunQueued,
}

/// Outcome of a user-requested refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Begin {
    /// The caller owns the flight and must call [`SingleFlight::finish`].
    Started,
    /// Folded into the flight already underway.
    Coalesced,
}

/// What a poll tick should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickDecision {
    Run,
    DeferBusy,
    DeferDialog,
}

/// Shared flight state. Clones observe the same gate.
#[derive(Clone, Debug, Default)]
pub struct SingleFlight {
    state: Rc<Cell<Flight>>,
}

impl SingleFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.get() != Flight::Idle
    }

    /// User path: start a flight, or queue one re-run behind the current one.
    pub fn request(&self) -> Begin {
        match self.state.get() {
            Flight::Idle => {
                self.state.set(Flight::Running);
                Begin::Started
            }
            Flight::Running | Flight::RerunQueued => {
                self.state.set(Flight::RerunQueued);
                Begin::Coalesced
            }
        }
    }

    /// Timer path: start only when idle and no dialog is open.
    pub fn tick(&self, dialog_open: bool) -> TickDecision {
        if self.is_busy() {
            TickDecision::DeferBusy
        } else if dialog_open {
            TickDecision::DeferDialog
        } else {
            self.state.set(Flight::Running);
            TickDecision::Run
        }
    }

    /// End the current flight. Returns `true` when a queued re-run should
    /// start now; the gate then stays held for it.
    pub fn finish(&self) -> bool {
        match self.state.get() {
            Flight::RerunQueued => {
                self.state.set(Flight::Running);
                true
            }
            Flight::Running | Flight::Idle => {
                self.state.set(Flight::Idle);
                false
            }
        }
    }
}

/// Cleared when the owning component unmounts. Results that land after
/// that are discarded. `Send + Sync`, so it can move into `on_cleanup`.
#[derive(Clone, Debug)]
pub struct MountFlag(Arc<AtomicBool>);

impl Default for MountFlag {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl MountFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
