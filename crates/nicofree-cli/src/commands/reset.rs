use nicofree_core::storage::Database;
use nicofree_core::{DailyUsageTracker, RecordStore, SessionCoordinator};

use super::timer::{load_timer, save_timer};

pub fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("refusing to reset without --yes (deletes all records and counters)".into());
    }

    let db = Database::open()?;
    let store = RecordStore::open_default()?;
    let usage = DailyUsageTracker::new(&db);
    let mut coordinator = SessionCoordinator::new(load_timer(&db), store, usage);

    let event = coordinator.on_reset();
    db.clear_usage_days()?;
    save_timer(&db, coordinator.timer())?;

    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
