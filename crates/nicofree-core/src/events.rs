use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every session-boundary change and poll tick produces an Event.
///
/// The core never formats or dispatches user-facing notifications itself;
/// the hosting layer renders these however it likes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        /// Best recorded streak at the moment the session began.
        personal_best: u64,
        at: DateTime<Utc>,
    },
    /// Periodic progress report while the timer is running.
    Tick {
        elapsed_seconds: u64,
        personal_best: u64,
        at: DateTime<Utc>,
    },
    /// Live streak just passed the personal best. Fires at most once per
    /// session (edge-triggered latch, re-armed on each start).
    RecordBroken {
        previous_best: u64,
        elapsed_seconds: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        duration_seconds: u64,
        new_best: bool,
        at: DateTime<Utc>,
    },
    UsageIncremented {
        count: u32,
        over_target: bool,
        at: DateTime<Utc>,
    },
    /// Records, usage counter and timer were all cleared.
    TrackerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        elapsed_seconds: u64,
        personal_best: u64,
        usage_count: u32,
        over_target: bool,
        at: DateTime<Utc>,
    },
}
