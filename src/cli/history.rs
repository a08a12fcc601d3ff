//! History command implementation

use anyhow::Result;
use chrono::Utc;

use quizbadge::config::Config;
use quizbadge::stats::time_bucket::day_bucket;

use super::{open_tracker, require_user};

/// Show a user's quiz history, newest last, followed by streak figures
pub fn history_command(config: &Config, user: Option<&str>) -> Result<()> {
    let user = require_user(config, user)?;
    let tracker = open_tracker(config)?;
    let results = tracker.history().load(&user)?;

    if results.is_empty() {
        println!("No quizzes recorded for {}.", user);
        return Ok(());
    }

    println!("Quizzes for {} ({}):\n", user, results.len());

    for result in &results {
        let day = day_bucket(&result.date).unwrap_or_else(|| result.date.clone());
        let difficulty = result.difficulty.map(|d| d.as_str()).unwrap_or("-");
        let category = result.category.as_deref().unwrap_or("-");
        let percentage = result
            .percentage
            .map(|p| format!("{:>3}%", p))
            .unwrap_or_else(|| "   ?".to_string());
        let score = result
            .score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  {}  {}  {}/{}  {:<8} {:<16} {}",
            day,
            percentage,
            score,
            result.total_questions,
            difficulty,
            category,
            result.performance_level
        );
    }

    let streaks = tracker.streaks(&user)?;
    let today = Utc::now().date_naive();
    println!();
    println!("Best streak: {} day(s)", streaks.best);
    if streaks.is_active(today) {
        println!("Current streak: {} day(s)", streaks.current);
    }

    Ok(())
}
