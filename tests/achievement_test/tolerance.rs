use quizbadge::stats::{AchievementBook, AchievementId};
use quizbadge::{Difficulty, QuizResult};

use crate::common::{at, day, result_on};

#[test]
fn test_unparseable_dates_do_not_count_toward_streaks() {
    let mut results = vec![result_on(day(2024, 3, 1), 60)];
    for _ in 0..3 {
        let mut r = result_on(day(2024, 3, 2), 60);
        r.date = "yesterday-ish".to_string();
        results.push(r);
    }

    let mut book = AchievementBook::new();
    book.evaluate_at(&results, None, at(2024, 3, 2));

    assert!(book.is_unlocked(AchievementId::FirstQuiz));
    assert!(!book.is_unlocked(AchievementId::Streak3));
    let progress = book.progress(AchievementId::Streak3).unwrap();
    assert!((progress - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_only_undated_results_leave_streaks_untouched() {
    let mut result = result_on(day(2024, 3, 1), 60);
    result.date = String::new();

    let mut book = AchievementBook::new();
    book.evaluate_at(&[result], None, at(2024, 3, 1));

    assert!(book.is_unlocked(AchievementId::FirstQuiz));
    assert_eq!(book.progress(AchievementId::Streak3), Some(0.0));
}

#[test]
fn test_multiple_results_on_one_day_count_once() {
    let results: Vec<_> = (8..12)
        .map(|hour| QuizResult::from_answers(format!("2024-03-01T{hour:02}:00:00Z"), 6, 4, 0))
        .collect();

    let mut book = AchievementBook::new();
    book.evaluate_at(&results, None, at(2024, 3, 1));
    let progress = book.progress(AchievementId::Streak3).unwrap();
    assert!((progress - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_lenient_json_history_evaluates() {
    let json = r#"[
        {"date": "2024-03-01T10:00:00Z", "score": 9, "totalQuestions": 10, "percentage": 90,
         "category": 42, "difficulty": "hard"},
        {"date": "2024-03-02 09:30:00", "score": 7, "totalQuestions": 10, "percentage": 70,
         "difficulty": "impossible"}
    ]"#;
    let results: Vec<QuizResult> = serde_json::from_str(json).unwrap();
    assert_eq!(results[0].category, None);
    assert_eq!(results[0].difficulty, Some(Difficulty::Hard));
    assert_eq!(results[1].difficulty, None);

    let mut book = AchievementBook::new();
    book.evaluate_at(&results, None, at(2024, 3, 2));
    assert!(book.is_unlocked(AchievementId::Accuracy90));
    assert!(!book.is_unlocked(AchievementId::NoSkip));
    let streak = book.progress(AchievementId::Streak3).unwrap();
    assert!((streak - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_hard_must_be_spelled_exactly() {
    let json = r#"[
        {"date": "2024-03-01", "score": 9, "totalQuestions": 10, "percentage": 90, "difficulty": "Hard"},
        {"date": "2024-03-02", "score": 9, "totalQuestions": 10, "percentage": 90, "difficulty": "HARD"},
        {"date": "2024-03-03", "score": 9, "totalQuestions": 10, "percentage": 90, "difficulty": " hard "}
    ]"#;
    let results: Vec<QuizResult> = serde_json::from_str(json).unwrap();
    assert!(results.iter().all(|r| r.difficulty.is_none()));

    let mut book = AchievementBook::new();
    book.evaluate_at(&results, None, at(2024, 3, 3));
    assert!(!book.is_unlocked(AchievementId::DifficultyHard));
    assert_eq!(book.progress(AchievementId::DifficultyHard), Some(0.0));
}

#[test]
fn test_bad_percentage_still_counts_toward_volume_and_streaks() {
    let mut records: Vec<serde_json::Value> = (1..=5)
        .map(|d| {
            serde_json::json!({
                "date": format!("2024-03-0{d}T12:00:00Z"),
                "score": 3,
                "totalQuestions": 10,
                "percentage": 30
            })
        })
        .collect();
    records[4]["percentage"] = serde_json::json!(66.7);
    let results: Vec<QuizResult> = serde_json::from_value(serde_json::Value::Array(records)).unwrap();
    assert_eq!(results.len(), 5);

    let mut book = AchievementBook::new();
    book.evaluate_at(&results, None, at(2024, 3, 5));

    assert!(book.is_unlocked(AchievementId::Rookie));
    assert!(book.is_unlocked(AchievementId::Streak3));
    assert!(!book.is_unlocked(AchievementId::FirstWin));
    assert!(!book.is_unlocked(AchievementId::Comeback));
}
