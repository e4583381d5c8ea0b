use clap::Subcommand;
use nicofree_core::storage::Database;
use nicofree_core::{DailyUsageTracker, RecordStore, SessionCoordinator, StreakTimer, UserProfile};

/// kv key for the persisted timer snapshot. Persisting the snapshot between
/// invocations is what lets a streak survive process restarts.
const TIMER_KEY: &str = "streak_timer";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a nicotine-free streak session
    Start,
    /// Stop the session, recording the streak and counting one usage
    Stop,
    /// Tick the timer and print the current state as JSON
    Status,
}

pub(crate) fn load_timer(db: &Database) -> StreakTimer {
    if let Ok(Some(json)) = db.kv_get(TIMER_KEY) {
        if let Ok(timer) = serde_json::from_str::<StreakTimer>(&json) {
            return timer;
        }
    }
    StreakTimer::new()
}

pub(crate) fn save_timer(
    db: &Database,
    timer: &StreakTimer,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    db.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let profile = UserProfile::load_or_default();
    let store = RecordStore::open_default()?;
    let usage = DailyUsageTracker::new(&db);
    let mut coordinator = SessionCoordinator::new(load_timer(&db), store, usage);

    match action {
        TimerAction::Start => match coordinator.on_start() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => {
                // Already running; show the state instead.
                println!(
                    "{}",
                    serde_json::to_string_pretty(&coordinator.snapshot(&profile))?
                );
            }
        },
        TimerAction::Stop => {
            let events = coordinator.on_stop(&profile);
            if events.is_empty() {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&coordinator.snapshot(&profile))?
                );
            } else {
                for event in &events {
                    println!("{}", serde_json::to_string_pretty(event)?);
                }
            }
        }
        TimerAction::Status => {
            for event in coordinator.tick() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&coordinator.snapshot(&profile))?
            );
        }
    }

    save_timer(&db, coordinator.timer())?;
    Ok(())
}
