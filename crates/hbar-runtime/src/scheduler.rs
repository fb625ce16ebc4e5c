#![forbid(unsafe_code)]

//! Observation scheduler.
//!
//! Coalesces bursts of size-change notifications into at most one pending
//! recomputation.
//!
//! # State Machine
//!
//! ```text
//!            notify (accepted)
//!   Idle ─────────────────────────▶ PendingRecompute
//!    ▲                                    │
//!    └──────────── take_pending ──────────┘
//! ```
//!
//! Notifications arriving while a recomputation is pending are dropped.
//! The state returns to `Idle` when the deferred task starts, before the
//! pass runs, so a change observed during the pass schedules a new one.
//!
//! # Modes
//!
//! - **Continuous**: element, surface, mount and content notifications are
//!   all accepted.
//! - **OneShot**: the host has no element-size observer. Per-element
//!   notifications are ignored; the mount pass and explicit surface
//!   resizes still schedule.
//!
//! # Invariants
//!
//! - At most one recomputation is pending at any time.
//! - After [`release`](ObservationScheduler::release) nothing is scheduled
//!   and a pending recomputation is discarded when it fires.

use std::fmt;

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// No recomputation pending.
    #[default]
    Idle,
    /// Exactly one recomputation is queued.
    PendingRecompute,
}

/// Whether continuous per-element observation is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObservationMode {
    /// Element size changes are observed.
    #[default]
    Continuous,
    /// Only mount and explicit resize notifications are seen.
    OneShot,
}

impl ObservationMode {
    /// Get the stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::OneShot => "one_shot",
        }
    }
}

/// Where a notification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// First measurement after mount.
    Mount,
    /// The container, a region or the nav column changed size.
    Element,
    /// The whole surface (window/viewport) was resized.
    Surface,
    /// Content was projected into or removed from a region.
    Content,
}

impl ChangeSource {
    /// Get the stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Element => "element",
            Self::Surface => "surface",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for ChangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the scheduler did with a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notify {
    /// A new recomputation must be deferred by the caller.
    Scheduled,
    /// Merged into the recomputation already pending.
    Coalesced,
    /// Dropped: released, or an element change in one-shot mode.
    Ignored,
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerStats {
    /// Notifications received.
    pub notifications: u64,
    /// Recomputations scheduled.
    pub scheduled: u64,
    /// Notifications merged into a pending recomputation.
    pub coalesced: u64,
    /// Recomputations started.
    pub executed: u64,
    /// Notifications dropped.
    pub ignored: u64,
}

/// Idle/PendingRecompute state machine.
#[derive(Debug, Clone, Default)]
pub struct ObservationScheduler {
    state: SchedulerState,
    mode: ObservationMode,
    released: bool,
    stats: SchedulerStats,
}

impl ObservationScheduler {
    /// Create an idle scheduler.
    #[must_use]
    pub fn new(mode: ObservationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> ObservationMode {
        self.mode
    }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Whether [`release`](Self::release) was called.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }

    /// Drop to one-shot mode.
    pub fn degrade(&mut self) {
        if self.mode != ObservationMode::OneShot {
            tracing::debug!("size observation unavailable, falling back to one-shot mode");
            self.mode = ObservationMode::OneShot;
        }
    }

    /// Feed a notification. On [`Notify::Scheduled`] the caller must defer
    /// exactly one task that calls [`take_pending`](Self::take_pending).
    pub fn notify(&mut self, source: ChangeSource) -> Notify {
        self.stats.notifications += 1;
        let outcome = if self.released
            || (self.mode == ObservationMode::OneShot && source == ChangeSource::Element)
        {
            self.stats.ignored += 1;
            Notify::Ignored
        } else if self.state == SchedulerState::PendingRecompute {
            self.stats.coalesced += 1;
            Notify::Coalesced
        } else {
            self.state = SchedulerState::PendingRecompute;
            self.stats.scheduled += 1;
            Notify::Scheduled
        };
        tracing::trace!(source = source.as_str(), outcome = ?outcome, "notification");
        outcome
    }

    /// Called when the deferred task fires. Returns `true` when a pass
    /// should run; the scheduler is already `Idle` again.
    pub fn take_pending(&mut self) -> bool {
        if self.state != SchedulerState::PendingRecompute {
            return false;
        }
        self.state = SchedulerState::Idle;
        if self.released {
            return false;
        }
        self.stats.executed += 1;
        true
    }

    /// Stop accepting notifications. Idempotent.
    pub fn release(&mut self) {
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_notification_schedules() {
        let mut s = ObservationScheduler::new(ObservationMode::Continuous);
        assert_eq!(s.notify(ChangeSource::Element), Notify::Scheduled);
        assert_eq!(s.state(), SchedulerState::PendingRecompute);
    }

    #[test]
    fn burst_coalesces_into_one() {
        let mut s = ObservationScheduler::new(ObservationMode::Continuous);
        assert_eq!(s.notify(ChangeSource::Element), Notify::Scheduled);
        for _ in 0..9 {
            assert_eq!(s.notify(ChangeSource::Element), Notify::Coalesced);
        }
        assert_eq!(s.notify(ChangeSource::Surface), Notify::Coalesced);
        assert!(s.take_pending());
        assert!(!s.take_pending());
        let stats = s.stats();
        assert_eq!(stats.notifications, 11);
        assert_eq!(stats.scheduled, 1);
        assert_eq!(stats.coalesced, 10);
        assert_eq!(stats.executed, 1);
    }

    #[test]
    fn idle_again_before_pass_runs() {
        let mut s = ObservationScheduler::new(ObservationMode::Continuous);
        s.notify(ChangeSource::Mount);
        assert!(s.take_pending());
        assert_eq!(s.state(), SchedulerState::Idle);
        assert_eq!(s.notify(ChangeSource::Element), Notify::Scheduled);
    }

    #[test]
    fn one_shot_ignores_element_changes() {
        let mut s = ObservationScheduler::new(ObservationMode::OneShot);
        assert_eq!(s.notify(ChangeSource::Element), Notify::Ignored);
        assert_eq!(s.notify(ChangeSource::Mount), Notify::Scheduled);
        assert!(s.take_pending());
        assert_eq!(s.notify(ChangeSource::Surface), Notify::Scheduled);
        assert_eq!(s.stats().ignored, 1);
    }

    #[test]
    fn degrade_switches_mode_once() {
        let mut s = ObservationScheduler::new(ObservationMode::Continuous);
        s.degrade();
        s.degrade();
        assert_eq!(s.mode(), ObservationMode::OneShot);
        assert_eq!(s.mode().as_str(), "one_shot");
    }

    #[test]
    fn release_discards_pending_and_ignores_new() {
        let mut s = ObservationScheduler::new(ObservationMode::Continuous);
        s.notify(ChangeSource::Element);
        s.release();
        assert!(!s.take_pending());
        assert_eq!(s.state(), SchedulerState::Idle);
        assert_eq!(s.notify(ChangeSource::Surface), Notify::Ignored);
        assert!(s.is_released());
        assert_eq!(s.stats().executed, 0);
    }

    #[test]
    fn take_pending_without_schedule_is_noop() {
        let mut s = ObservationScheduler::default();
        assert!(!s.take_pending());
        assert_eq!(s.stats(), SchedulerStats::default());
    }
}
