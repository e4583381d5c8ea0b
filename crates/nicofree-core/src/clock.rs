//! Clock abstraction.
//!
//! All time-dependent components take a [`Clock`] so that elapsed-time and
//! date-rollover logic can be tested without sleeping. Elapsed time is always
//! recomputed on demand from `now - started_at`; nothing in the core spins a
//! thread to advance a counter.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock: fmt::Debug + Send + Sync {
    /// Current instant in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current calendar date in the local time zone.
    ///
    /// Daily rollover compares calendar dates, never elapsed seconds, so DST
    /// shifts and leap seconds cannot drift the reset boundary.
    fn today_local(&self) -> NaiveDate;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today_local(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub(crate) fn default_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// Manually controlled clock for tests.
///
/// `now` and `today` are set independently: the UTC instant drives elapsed
/// time while the local date drives daily rollover.
#[derive(Debug)]
pub struct FixedClock {
    now: std::sync::Mutex<DateTime<Utc>>,
    today: std::sync::Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
            today: std::sync::Mutex::new(today),
        }
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + chrono::Duration::seconds(secs);
    }

    pub fn set_today(&self, date: NaiveDate) {
        *self.today.lock().unwrap() = date;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    fn today_local(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }
}
