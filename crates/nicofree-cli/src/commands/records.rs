use clap::Subcommand;
use nicofree_core::RecordStore;

use super::format_duration;

#[derive(Subcommand)]
pub enum RecordsAction {
    /// List the best streaks, highest first
    List,
    /// Show the personal best
    Best,
    /// Delete all records
    Clear,
}

pub fn run(action: RecordsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = RecordStore::open_default()?;

    match action {
        RecordsAction::List => {
            if store.is_empty() {
                println!("No nicotine-free records yet.");
            }
            for (rank, record) in store.records().iter().enumerate() {
                println!(
                    "#{}  {} - {} (free from {})",
                    rank + 1,
                    format_duration(record.duration_seconds),
                    record.user_name,
                    record.nicotine_type
                );
            }
        }
        RecordsAction::Best => {
            let best = store.personal_best();
            if best == 0 {
                println!("No nicotine-free records yet.");
            } else {
                println!("Your best nicotine-free time: {}", format_duration(best));
            }
        }
        RecordsAction::Clear => {
            store.clear();
            println!("Records cleared.");
        }
    }

    Ok(())
}
