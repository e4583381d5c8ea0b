//! Daily usage counter with automatic date rollover.
//!
//! The counter lives in the kv store as `usage.current_count` plus
//! `usage.last_reset_date` (`YYYY-MM-DD`, local time zone). Every read or
//! mutation first compares the stored date against today and atomically
//! zeroes the counter on a mismatch, so a stale day's count can never leak
//! into the next one -- even if the process slept across midnight.
//!
//! Persistence failures degrade to safe defaults and a warning; they are
//! never surfaced to the caller.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use crate::clock::{default_clock, Clock};
use crate::profile::NicotineType;
use crate::storage::Database;

const KEY_COUNT: &str = "usage.current_count";
const KEY_LAST_RESET: &str = "usage.last_reset_date";

/// Tracks how many times the user gave in today.
pub struct DailyUsageTracker<'a> {
    db: &'a Database,
    clock: Arc<dyn Clock>,
}

impl<'a> DailyUsageTracker<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self::with_clock(db, default_clock())
    }

    pub fn with_clock(db: &'a Database, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Increment today's count by one, returning the new count.
    ///
    /// Also bumps the per-day history row for today.
    pub fn increment(&self) -> u32 {
        self.rollover_if_needed();
        let next = self.read_count() + 1;
        self.write_count(next);
        if let Err(e) = self.db.bump_usage_day(self.clock.today_local()) {
            warn!(error = %e, "failed to record usage history");
        }
        next
    }

    /// Explicit user reset: zero the count and stamp today's date.
    pub fn reset(&self) {
        let today = self.clock.today_local();
        self.write_count(0);
        self.write_last_reset(today);
        if let Err(e) = self.db.zero_usage_day(today) {
            warn!(error = %e, "failed to reset usage history");
        }
    }

    /// Today's count, after the rollover check.
    pub fn current_count(&self) -> u32 {
        self.rollover_if_needed();
        self.read_count()
    }

    /// True iff a target is configured and today's count has reached it.
    pub fn is_over_target(&self, target: u32) -> bool {
        target > 0 && self.current_count() >= target
    }

    /// Human-readable summary, e.g. `"3 cigarettes today (Target: 10)"`.
    pub fn formatted_message(&self, nicotine_type: NicotineType, target: u32) -> String {
        let count = self.current_count();
        let message = format!("{count} {} today", nicotine_type.usage_noun());
        if target > 0 {
            format!("{message} (Target: {target})")
        } else {
            message
        }
    }

    /// Recent daily totals, newest first.
    pub fn history(&self, limit: u32) -> Vec<(NaiveDate, u32)> {
        match self.db.usage_history(limit) {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "failed to read usage history");
                Vec::new()
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Zero the counter and advance the stored date if it is not today.
    /// Runs before every operation, so the invariant
    /// `last_reset_date == today` holds whenever the count is observed.
    fn rollover_if_needed(&self) {
        let today = self.clock.today_local();
        match self.read_last_reset() {
            Some(date) if date == today => {}
            _ => {
                self.write_count(0);
                self.write_last_reset(today);
            }
        }
    }

    fn read_count(&self) -> u32 {
        match self.db.kv_get(KEY_COUNT) {
            Ok(Some(value)) => value.parse().unwrap_or(0),
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "failed to read usage count");
                0
            }
        }
    }

    fn write_count(&self, count: u32) {
        if let Err(e) = self.db.kv_set(KEY_COUNT, &count.to_string()) {
            warn!(error = %e, "failed to persist usage count");
        }
    }

    fn read_last_reset(&self) -> Option<NaiveDate> {
        match self.db.kv_get(KEY_LAST_RESET) {
            Ok(Some(value)) => NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read usage reset date");
                None
            }
        }
    }

    fn write_last_reset(&self, date: NaiveDate) {
        if let Err(e) = self.db.kv_set(KEY_LAST_RESET, &date.to_string()) {
            warn!(error = %e, "failed to persist usage reset date");
        }
    }
}
