//! CLI command implementations

pub mod badges;
pub mod evaluate;
pub mod history;
pub mod init;
pub mod leaderboard;
pub mod record;

use anyhow::{bail, Result};

use quizbadge::config::Config;
use quizbadge::stats::{QuizTracker, UnlockedAchievement};

/// Resolve the user a command acts on, or explain how to set one
fn require_user(config: &Config, explicit: Option<&str>) -> Result<String> {
    match config.resolve_user(explicit) {
        Some(user) => Ok(user),
        None => bail!("No user given. Pass --user or set settings.default_user in the config."),
    }
}

fn open_tracker(config: &Config) -> Result<QuizTracker> {
    QuizTracker::open(config)
}

fn print_unlocks(unlocked: &[UnlockedAchievement]) {
    if unlocked.is_empty() {
        println!("No new achievements.");
        return;
    }

    println!("Unlocked {} achievement(s):", unlocked.len());
    for u in unlocked {
        println!(
            "  {} {} [{}] - {}",
            u.achievement.icon,
            u.achievement.title,
            u.achievement.rarity.label(),
            u.achievement.description
        );
    }
}
