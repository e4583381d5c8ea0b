use clap::Subcommand;
use nicofree_core::storage::Database;
use nicofree_core::{DailyUsageTracker, UserProfile};

#[derive(Subcommand)]
pub enum UsageAction {
    /// Show today's usage against the daily target
    Show,
    /// Count one usage for today
    Increment,
    /// Reset today's counter to zero
    Reset,
    /// Show recent daily totals
    History {
        /// Number of days to show
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

pub fn run(action: UsageAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let profile = UserProfile::load_or_default();
    let tracker = DailyUsageTracker::new(&db);

    match action {
        UsageAction::Show => {
            println!(
                "{}",
                tracker.formatted_message(profile.nicotine_type, profile.daily_target)
            );
            if tracker.is_over_target(profile.daily_target) {
                println!("Over your daily target.");
            }
        }
        UsageAction::Increment => {
            tracker.increment();
            println!(
                "{}",
                tracker.formatted_message(profile.nicotine_type, profile.daily_target)
            );
        }
        UsageAction::Reset => {
            tracker.reset();
            println!("Usage counter reset.");
        }
        UsageAction::History { days } => {
            let history = tracker.history(days);
            if history.is_empty() {
                println!("No usage recorded yet.");
            }
            for (date, count) in history {
                println!("{date}  {count}");
            }
        }
    }

    Ok(())
}
