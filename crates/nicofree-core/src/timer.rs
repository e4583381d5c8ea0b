//! Streak timer state machine.
//!
//! Wall-clock based: the timer remembers the instant a session started and
//! derives elapsed time on demand. There is no internal thread; the caller
//! invokes `tick()` periodically (once per second is plenty) to drive the
//! record-surpass check.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running -> Idle
//! ```
//!
//! `start()` while running and `stop()` while idle are defensive no-ops.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::{default_clock, Clock};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Active streak timer.
///
/// The core never persists this itself; a host may serialize it between
/// process runs so a streak survives restarts, which is why the struct is
/// serde-friendly. The clock is skipped and restored to the system clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakTimer {
    state: TimerState,
    /// Set exactly once per session on `start()`, cleared on `stop()`.
    started_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Elapsed seconds observed at the last stop.
    #[serde(default)]
    last_elapsed_seconds: u64,
    /// Best recorded streak, supplied by the coordinator.
    #[serde(default)]
    personal_best: u64,
    /// One-shot latch for the record-broken event, re-armed on `start()`.
    #[serde(default)]
    record_notified: bool,
    #[serde(skip, default = "default_clock")]
    clock: Arc<dyn Clock>,
}

impl Default for StreakTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl StreakTimer {
    pub fn new() -> Self {
        Self::with_clock(default_clock())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: TimerState::Idle,
            started_at: None,
            last_elapsed_seconds: 0,
            personal_best: 0,
            record_notified: false,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn personal_best(&self) -> u64 {
        self.personal_best
    }

    /// Live elapsed seconds while running (floored); the last observed
    /// value while idle.
    pub fn elapsed_seconds(&self) -> u64 {
        match (self.state, self.started_at) {
            (TimerState::Running, Some(started_at)) => {
                let delta = self.clock.now_utc() - started_at;
                delta.num_seconds().max(0) as u64
            }
            _ => self.last_elapsed_seconds,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Update the best-streak threshold used by the surpass check.
    pub fn set_personal_best(&mut self, best: u64) {
        self.personal_best = best;
    }

    /// Begin a session. No-op (None) if already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.state == TimerState::Running {
            return None;
        }
        let now = self.clock.now_utc();
        self.state = TimerState::Running;
        self.started_at = Some(now);
        self.record_notified = false;
        Some(Event::TimerStarted {
            personal_best: self.personal_best,
            at: now,
        })
    }

    /// End the session, returning elapsed whole seconds.
    ///
    /// Stopping while idle is a defensive no-op returning 0.
    pub fn stop(&mut self) -> u64 {
        if self.state != TimerState::Running {
            return 0;
        }
        let elapsed = self.elapsed_seconds();
        self.state = TimerState::Idle;
        self.started_at = None;
        self.last_elapsed_seconds = elapsed;
        elapsed
    }

    /// Call periodically while running.
    ///
    /// Returns `Some(Event::RecordBroken)` on the tick where the live streak
    /// first moves strictly above the personal best, and never again for
    /// this session. Edge-triggered so a per-second poll cannot re-fire it.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let elapsed = self.elapsed_seconds();
        if self.personal_best > 0 && elapsed > self.personal_best && !self.record_notified {
            self.record_notified = true;
            return Some(Event::RecordBroken {
                previous_best: self.personal_best,
                elapsed_seconds: elapsed,
                at: self.clock.now_utc(),
            });
        }
        None
    }

    /// Return to a pristine idle state (part of the global reset).
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.started_at = None;
        self.last_elapsed_seconds = 0;
        self.record_notified = false;
    }
}
