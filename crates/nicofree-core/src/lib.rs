//! # Nicofree Core Library
//!
//! Core business logic for nicofree, a personal nicotine-free streak
//! tracker. All operations are available through the standalone CLI binary;
//! any GUI would be a thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Streak timer**: a wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for the record-surpass check
//! - **Record store**: versioned-JSON leaderboard of the top streaks
//! - **Daily usage tracker**: SQLite-backed counter that rolls over
//!   automatically on local date changes
//! - **Session coordinator**: wires the three together on start/stop/reset
//!
//! ## Key components
//!
//! - [`StreakTimer`]: streak timer state machine
//! - [`RecordStore`]: personal-best persistence
//! - [`DailyUsageTracker`]: daily counter with date rollover
//! - [`SessionCoordinator`]: start/stop/reset orchestration
//! - [`UserProfile`]: onboarding-supplied settings (read-only to the core)

pub mod clock;
pub mod error;
pub mod events;
pub mod profile;
pub mod records;
pub mod session;
pub mod storage;
pub mod timer;
pub mod usage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, StoreError, ValidationError};
pub use events::Event;
pub use profile::{NicotineType, UserProfile};
pub use records::{RecordStore, StreakRecord};
pub use session::SessionCoordinator;
pub use storage::Database;
pub use timer::{StreakTimer, TimerState};
pub use usage::DailyUsageTracker;
