//! Achievement checking logic
//!
//! Each rule is checked against an [`EvaluationContext`] built once per
//! evaluation. A check either yields an [`Outcome`] or `None` when the rule's
//! precondition (enough history, a parseable date) is not met, in which case
//! the badge must be left untouched.

use chrono::{DateTime, Utc};

use super::definitions::{Achievement, Rule};
use super::streaks::StreakInfo;
use crate::domain::QuizResult;

/// Result of checking one rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub met: bool,
    /// Normalized progress in [0, 1]; only threshold rules report it
    pub progress: Option<f64>,
}

impl Outcome {
    fn milestone(met: bool) -> Self {
        Self {
            met,
            progress: None,
        }
    }

    fn threshold(value: u64, target: u32) -> Self {
        Self {
            met: value >= u64::from(target),
            progress: Some(ratio(value, target)),
        }
    }
}

/// Everything the rules look at, derived once from the raw history
pub struct EvaluationContext<'a> {
    results: &'a [QuizResult],
    /// Results ordered newest first; unparseable dates sort last
    by_recency: Vec<&'a QuizResult>,
    streak: StreakInfo,
    score_total: u64,
    rank: Option<u32>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(results: &'a [QuizResult], rank: Option<u32>) -> Self {
        let mut keyed: Vec<(Option<DateTime<Utc>>, &QuizResult)> =
            results.iter().map(|r| (r.finished_at(), r)).collect();
        // Stable: equal timestamps keep their recorded order
        keyed.sort_by(|a, b| b.0.cmp(&a.0));

        Self {
            results,
            by_recency: keyed.into_iter().map(|(_, r)| r).collect(),
            streak: StreakInfo::from_results(results),
            score_total: results.iter().filter_map(|r| r.score).map(u64::from).sum(),
            rank,
        }
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn longest_streak(&self) -> u32 {
        self.streak.best
    }

    pub fn score_total(&self) -> u64 {
        self.score_total
    }

    pub fn rank(&self) -> Option<u32> {
        self.rank
    }
}

/// Check a single achievement's rule.
///
/// Returns `None` when the rule cannot be judged yet.
pub fn check_achievement(achievement: &Achievement, ctx: &EvaluationContext<'_>) -> Option<Outcome> {
    let target = achievement.target.unwrap_or(1);

    match achievement.rule {
        Rule::AnyResult => Some(Outcome::milestone(!ctx.results.is_empty())),

        Rule::PercentageAtLeast(min) => Some(Outcome::milestone(
            ctx.results.iter().any(|r| r.percentage.is_some_and(|p| p >= min)),
        )),

        Rule::PerfectScore => Some(Outcome::milestone(
            ctx.results.iter().any(|r| r.percentage == Some(100)),
        )),

        Rule::NoSkippedQuestions => Some(Outcome::milestone(
            ctx.results.iter().any(|r| r.skipped_questions == Some(0)),
        )),

        Rule::Comeback { min_gain } => {
            let [latest, previous, ..] = ctx.by_recency.as_slice() else {
                return None;
            };
            // A pair with an unreadable percentage cannot show a gain
            let met = match (latest.percentage, previous.percentage) {
                (Some(latest), Some(previous)) => {
                    i64::from(latest) - i64::from(previous) >= i64::from(min_gain)
                }
                _ => false,
            };
            Some(Outcome::milestone(met))
        }

        Rule::RankAtMost(max_rank) => Some(Outcome::milestone(
            ctx.rank.is_some_and(|rank| (1..=max_rank).contains(&rank)),
        )),

        Rule::RecentQuality {
            window,
            min_percentage,
        } => {
            if window == 0 || ctx.by_recency.len() < window {
                return None;
            }
            let qualifying = ctx.by_recency[..window]
                .iter()
                .filter(|r| r.percentage.is_some_and(|p| p >= min_percentage))
                .count();
            Some(Outcome {
                met: qualifying == window,
                progress: Some(qualifying as f64 / window as f64),
            })
        }

        Rule::QuizCount => Some(Outcome::threshold(ctx.results.len() as u64, target)),

        Rule::ScoreTotal => Some(Outcome::threshold(ctx.score_total, target)),

        Rule::HardQuizzes { min_percentage } => {
            let hard = ctx
                .results
                .iter()
                .filter(|r| r.is_hard() && r.percentage.is_some_and(|p| p >= min_percentage))
                .count();
            Some(Outcome::threshold(hard as u64, target))
        }

        Rule::DailyStreak => {
            if !ctx.streak.has_activity() {
                return None;
            }
            Some(Outcome::threshold(u64::from(ctx.streak.best), target))
        }
    }
}

/// `min(value / target, 1)`, with a zero target counting as already reached
fn ratio(value: u64, target: u32) -> f64 {
    if target == 0 {
        return 1.0;
    }
    (value as f64 / f64::from(target)).min(1.0)
}
