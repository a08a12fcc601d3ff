//! Record command implementation

use anyhow::{bail, Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};

use quizbadge::config::Config;
use quizbadge::stats::time_bucket::parse_timestamp;
use quizbadge::{Difficulty, QuizResult};

use super::{open_tracker, print_unlocks, require_user};

#[derive(Args)]
pub struct RecordArgs {
    /// Display name (defaults to settings.default_user)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Read the result as JSON from a file ("-" for stdin)
    #[arg(short, long, conflicts_with_all = ["correct", "wrong", "skipped"])]
    pub file: Option<PathBuf>,

    /// Correct answers
    #[arg(long)]
    pub correct: Option<u32>,

    /// Wrong answers
    #[arg(long, default_value_t = 0)]
    pub wrong: u32,

    /// Skipped questions
    #[arg(long, default_value_t = 0)]
    pub skipped: u32,

    #[arg(long)]
    pub category: Option<String>,

    /// easy, medium or hard (defaults to settings.default_difficulty)
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Finish time (defaults to now)
    #[arg(long)]
    pub date: Option<String>,
}

/// Record a finished quiz for a user and report unlocked achievements
pub fn record_command(config: &Config, args: RecordArgs) -> Result<()> {
    let user = require_user(config, args.user.as_deref())?;
    let result = build_result(config, &args)?;

    let tracker = open_tracker(config)?;
    let unlocked = tracker.complete_quiz(&user, &result)?;

    println!(
        "Recorded {}/{} ({}%, {}) for {}",
        result.score.unwrap_or_default(),
        result.total_questions,
        result.percentage.unwrap_or_default(),
        result.performance_level,
        user
    );
    match tracker.leaderboard().user_rank(&user)? {
        Some(rank) => println!("Leaderboard rank: #{}", rank),
        None => println!("Not on the leaderboard."),
    }
    print_unlocks(&unlocked);

    Ok(())
}

fn build_result(config: &Config, args: &RecordArgs) -> Result<QuizResult> {
    if let Some(path) = &args.file {
        return read_result(path);
    }

    let Some(correct) = args.correct else {
        bail!("Pass --correct (with --wrong/--skipped) or --file");
    };

    let total = correct
        .checked_add(args.wrong)
        .and_then(|t| t.checked_add(args.skipped));
    if total.is_none() {
        bail!("Answer counts are too large");
    }

    let date = match &args.date {
        Some(raw) => {
            if parse_timestamp(raw).is_none() {
                bail!(
                    "Unrecognized date '{}' (expected RFC 3339, 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DD')",
                    raw
                );
            }
            raw.trim().to_string()
        }
        None => Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    let difficulty = match args.difficulty.as_deref() {
        Some(raw) => Difficulty::parse(raw)
            .with_context(|| format!("Unknown difficulty '{}' (expected easy, medium or hard)", raw))?,
        None => config.settings.default_difficulty,
    };

    let mut result =
        QuizResult::from_answers(date, correct, args.wrong, args.skipped).with_difficulty(difficulty);
    if let Some(category) = &args.category {
        result = result.with_category(category.clone());
    }
    Ok(result)
}

fn read_result(path: &Path) -> Result<QuizResult> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read result from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read result file: {}", path.display()))?
    };

    serde_json::from_str(&content).context("Failed to parse quiz result JSON")
}
