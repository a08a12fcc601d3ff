use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quizbadge::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "quizbadge")]
#[command(about = "Local quiz history, leaderboard and achievement tracking")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.quizbadge/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a finished quiz and evaluate achievements
    Record(cli::record::RecordArgs),

    /// Show a user's quiz history
    History {
        /// Display name (defaults to settings.default_user)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show the leaderboard
    Leaderboard {
        /// Only show the first N entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Re-evaluate a user's achievements against their history
    Evaluate {
        #[arg(short, long)]
        user: Option<String>,
    },

    /// List a user's badges
    Badges(cli::badges::BadgesArgs),

    /// Lock all of a user's badges again
    Reset {
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(Config::global_config_path);

    let load_config = || Config::load_or_init(&config_path);

    match cli.command {
        Commands::Init { force } => cli::init::init_command(&config_path, force),
        Commands::Record(args) => cli::record::record_command(&load_config()?, args),
        Commands::History { user } => {
            cli::history::history_command(&load_config()?, user.as_deref())
        }
        Commands::Leaderboard { limit } => {
            cli::leaderboard::leaderboard_command(&load_config()?, limit)
        }
        Commands::Evaluate { user } => {
            cli::evaluate::evaluate_command(&load_config()?, user.as_deref())
        }
        Commands::Badges(args) => cli::badges::badges_command(&load_config()?, args),
        Commands::Reset { user } => cli::evaluate::reset_command(&load_config()?, user.as_deref()),
    }
}
