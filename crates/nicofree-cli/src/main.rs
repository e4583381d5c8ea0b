use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nicofree-cli", version, about = "Nicofree CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Streak timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Daily usage counter
    Usage {
        #[command(subcommand)]
        action: commands::usage::UsageAction,
    },
    /// Best-streak records
    Records {
        #[command(subcommand)]
        action: commands::records::RecordsAction,
    },
    /// User profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Delete all records, counters and the active session
    Reset {
        /// Confirm the destructive reset
        #[arg(long)]
        yes: bool,
    },
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Usage { action } => commands::usage::run(action),
        Commands::Records { action } => commands::records::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Reset { yes } => commands::reset::run(yes),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "nicofree-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
