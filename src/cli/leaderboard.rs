//! Leaderboard command implementation

use anyhow::Result;

use quizbadge::config::Config;

use super::open_tracker;

/// Show the leaderboard, best first
pub fn leaderboard_command(config: &Config, limit: Option<usize>) -> Result<()> {
    let tracker = open_tracker(config)?;
    let entries = tracker.leaderboard().entries()?;

    if entries.is_empty() {
        println!("Leaderboard is empty.");
        return Ok(());
    }

    let shown = limit.unwrap_or(entries.len()).min(entries.len());
    println!("Leaderboard (top {} of {}):\n", shown, entries.len());

    for (pos, entry) in entries.iter().take(shown).enumerate() {
        println!(
            "  #{:<3} {:<20} {:>5} pts  {:>3}%  {}",
            pos + 1,
            entry.name,
            entry.score,
            entry.percentage,
            entry.difficulty.map(|d| d.as_str()).unwrap_or("-")
        );
    }

    Ok(())
}
