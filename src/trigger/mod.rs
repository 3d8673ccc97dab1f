//! Decides when a scan runs.
//!
//! [`ScanTrigger`] is a plain state machine with a single outstanding
//! deadline; [`controller::ScanController`] drives it from a tokio event loop.
//! A scan runs immediately once the dictionary is ready or when a rescan is
//! requested explicitly. User interactions are debounced: each one pushes the
//! deadline out again so only the last interaction of a burst causes a scan.

pub mod controller;

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    PendingScan { deadline: Instant },
    Scanning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Nothing to do.
    None,
    /// Run a scan now, then call [`ScanTrigger::scan_finished`].
    ScanNow,
    /// Wake up at this instant and call [`ScanTrigger::on_deadline`].
    Schedule(Instant),
}

/// Events feeding the trigger from the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Interaction,
    ManualRescan,
}

#[derive(Debug)]
pub struct ScanTrigger {
    debounce: Duration,
    state: TriggerState,
}

impl ScanTrigger {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            state: TriggerState::Idle,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Deadline of the pending debounced scan, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TriggerState::PendingScan { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Dictionary is ready: scan right away.
    pub fn on_ready(&mut self) -> TriggerAction {
        self.state = TriggerState::Scanning;
        TriggerAction::ScanNow
    }

    /// User interacted: (re)arm the debounce window.
    pub fn on_interaction(&mut self, now: Instant) -> TriggerAction {
        let deadline = now + self.debounce;
        if let TriggerState::PendingScan { .. } = self.state {
            debug!("Restarting debounce window");
        }
        self.state = TriggerState::PendingScan { deadline };
        TriggerAction::Schedule(deadline)
    }

    /// Explicit rescan: drops any pending debounced scan and scans now.
    pub fn on_manual_rescan(&mut self) -> TriggerAction {
        if let TriggerState::PendingScan { .. } = self.state {
            debug!("Cancelling pending scan in favour of manual rescan");
        }
        self.state = TriggerState::Scanning;
        TriggerAction::ScanNow
    }

    /// Timer fired. Stale wake-ups (cancelled or rescheduled) are ignored.
    pub fn on_deadline(&mut self, now: Instant) -> TriggerAction {
        match self.state {
            TriggerState::PendingScan { deadline } if now >= deadline => {
                self.state = TriggerState::Scanning;
                TriggerAction::ScanNow
            }
            _ => TriggerAction::None,
        }
    }

    pub fn scan_finished(&mut self) {
        if self.state == TriggerState::Scanning {
            self.state = TriggerState::Idle;
        }
    }
}
