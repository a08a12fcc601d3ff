//! Daily streak computation
//!
//! A streak is a run of calendar-consecutive days with at least one quiz
//! result. Days are deduplicated before runs are measured, so several quizzes
//! on the same day count once.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::QuizResult;

/// Streak figures derived from a result history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakInfo {
    /// Longest run of consecutive days anywhere in the history
    pub best: u32,
    /// Run ending on the most recent active day
    pub current: u32,
    pub last_activity_day: Option<NaiveDate>,
}

impl StreakInfo {
    /// Compute streaks from the distinct calendar days present in `results`.
    ///
    /// Results whose date cannot be parsed do not contribute a day.
    pub fn from_results(results: &[QuizResult]) -> Self {
        Self::from_days(results.iter().filter_map(QuizResult::day))
    }

    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let days: BTreeSet<NaiveDate> = days.into_iter().collect();

        let mut best = 0;
        let mut current = 0;
        let mut previous: Option<NaiveDate> = None;

        for day in &days {
            current = match previous {
                Some(prev) if (*day - prev).num_days() == 1 => current + 1,
                _ => 1,
            };
            best = best.max(current);
            previous = Some(*day);
        }

        Self {
            best,
            current,
            last_activity_day: previous,
        }
    }

    /// Whether any day was recorded at all
    pub fn has_activity(&self) -> bool {
        self.last_activity_day.is_some()
    }

    /// Check if the current streak is still alive (activity today or yesterday)
    pub fn is_active(&self, today: NaiveDate) -> bool {
        let Some(last_day) = self.last_activity_day else {
            return false;
        };

        let days_since = (today - last_day).num_days();
        (0..=1).contains(&days_since)
    }
}
