use clap::Subcommand;
use nicofree_core::{NicotineType, UserProfile};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create or replace the user profile
    Init {
        /// Your name
        #[arg(long)]
        name: String,
        /// Nicotine category: cigarettes, vaping, pouches, gum or other
        #[arg(long = "type", default_value = "cigarettes")]
        nicotine_type: NicotineType,
        /// Previous daily consumption to stay under (omit for no target)
        #[arg(long)]
        amount: Option<u32>,
    },
    /// Show the current profile
    Show,
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfileAction::Init {
            name,
            nicotine_type,
            amount,
        } => {
            let profile = UserProfile {
                user_name: name,
                nicotine_type,
                daily_target: amount.unwrap_or(0),
            };
            profile.validate()?;
            profile.save()?;
            println!(
                "Hello, {}! Free from {}.",
                profile.user_name, profile.nicotine_type
            );
        }
        ProfileAction::Show => {
            let profile = UserProfile::load()?;
            println!("Name: {}", profile.user_name);
            println!("Free from: {}", profile.nicotine_type);
            if profile.daily_target > 0 {
                println!("Daily target: {}", profile.daily_target);
            } else {
                println!("Daily target: none");
            }
        }
    }

    Ok(())
}
