//! Evaluate and reset command implementations

use anyhow::Result;

use quizbadge::config::Config;

use super::{open_tracker, print_unlocks, require_user};

/// Re-run achievement evaluation for a user
pub fn evaluate_command(config: &Config, user: Option<&str>) -> Result<()> {
    let user = require_user(config, user)?;
    let tracker = open_tracker(config)?;

    let unlocked = tracker.evaluate_user(&user)?;
    print_unlocks(&unlocked);

    let book = tracker.achievements(&user)?;
    println!(
        "{}/{} achievements unlocked.",
        book.unlocked_count(),
        book.list().len()
    );
    Ok(())
}

/// Lock all of a user's badges again
pub fn reset_command(config: &Config, user: Option<&str>) -> Result<()> {
    let user = require_user(config, user)?;
    let tracker = open_tracker(config)?;

    tracker.reset_achievements(&user)?;
    println!("Achievements reset for {}.", user);
    Ok(())
}
