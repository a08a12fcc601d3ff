//! Shared test utilities for achievement and tracker tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use quizbadge::stats::QuizTracker;
use quizbadge::{Difficulty, QuizResult};
use tempfile::TempDir;

/// A result finishing at noon UTC on the given day with the given percentage
pub fn result_on(day: NaiveDate, percentage: u32) -> QuizResult {
    QuizResult {
        date: format!("{}T12:00:00.000Z", day.format("%Y-%m-%d")),
        score: Some(percentage / 10),
        total_questions: 10,
        wrong_answers: 10 - percentage / 10,
        skipped_questions: Some(1),
        percentage: Some(percentage),
        performance_level: quizbadge::performance_level(percentage).to_string(),
        category: Some("General".to_string()),
        difficulty: Some(Difficulty::Medium),
    }
}

/// `count` results on consecutive days starting at `start`
pub fn consecutive_days(start: NaiveDate, count: i64, percentage: u32) -> Vec<QuizResult> {
    (0..count)
        .map(|offset| result_on(start + Duration::days(offset), percentage))
        .collect()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .expect("valid test timestamp")
}

/// Creates a tracker backed by a fresh database in a temp dir
pub fn temp_tracker() -> (TempDir, QuizTracker) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let tracker =
        QuizTracker::with_path(&dir.path().join("storage.db")).expect("Failed to open tracker");
    (dir, tracker)
}
