use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::difficulty::{lenient_difficulty, Difficulty};
use crate::stats::time_bucket::{calendar_day, parse_timestamp};

/// Outcome of one finished quiz, as stored in a user's history.
///
/// Records are written once and never edited. Field names match the JSON
/// written by the quiz flow, so older records may lack `category`,
/// `difficulty` or `skippedQuestions`.
///
/// Decoding is per field: a field that is missing or has the wrong shape
/// decodes to `None` (or zero for plain counts) instead of rejecting the
/// record, so one bad value only affects the rules that read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// When the quiz finished (RFC 3339, naive datetime, or a bare date)
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,

    /// Correct answers (or points)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub score: Option<u32>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub total_questions: u32,

    #[serde(default, deserialize_with = "lenient_count")]
    pub wrong_answers: u32,

    /// `None` when the record predates skip tracking
    #[serde(
        default,
        deserialize_with = "lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub skipped_questions: Option<u32>,

    /// Rounded share of correct answers, 0..=100
    #[serde(default, deserialize_with = "lenient_u32")]
    pub percentage: Option<u32>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub performance_level: String,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_difficulty",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
}

impl QuizResult {
    /// Build a result from answer counts, deriving percentage and performance level.
    ///
    /// The total saturates at `u32::MAX`; callers taking counts from user input
    /// should reject overflowing sums themselves.
    pub fn from_answers(date: impl Into<String>, correct: u32, wrong: u32, skipped: u32) -> Self {
        let total = correct.saturating_add(wrong).saturating_add(skipped);
        let percentage = if total == 0 {
            0
        } else {
            ((f64::from(correct) / f64::from(total)) * 100.0).round() as u32
        };

        Self {
            date: date.into(),
            score: Some(correct),
            total_questions: total,
            wrong_answers: wrong,
            skipped_questions: Some(skipped),
            percentage: Some(percentage),
            performance_level: performance_level(percentage).to_string(),
            category: None,
            difficulty: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Parsed finish time, normalized to UTC for ordering
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date).map(|dt| dt.to_utc())
    }

    /// Calendar day the quiz finished on, in the offset it was recorded with
    pub fn day(&self) -> Option<NaiveDate> {
        calendar_day(&self.date)
    }

    pub fn is_hard(&self) -> bool {
        self.difficulty == Some(Difficulty::Hard)
    }
}

/// Label shown on the result screen for a percentage
pub fn performance_level(percentage: u32) -> &'static str {
    match percentage {
        90.. => "Outstanding",
        70..=89 => "Great",
        50..=69 => "Good",
        _ => "Keep Practicing",
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Non-negative integers that fit a `u32`; anything else (floats, negatives, strings) is `None`
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .and_then(|n| u32::try_from(n).ok()))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_u32(deserializer)?.unwrap_or(0))
}
