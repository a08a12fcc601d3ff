use quizbadge::stats::{AchievementBook, AchievementId};
use quizbadge::QuizResult;

use crate::common::{at, consecutive_days, day, result_on};

fn sorted(mut ids: Vec<AchievementId>) -> Vec<AchievementId> {
    ids.sort();
    ids
}

#[test]
fn test_empty_history_unlocks_nothing() {
    let mut book = AchievementBook::new();
    assert!(book.evaluate_at(&[], None, at(2024, 3, 1)).is_empty());
    assert_eq!(book.unlocked_count(), 0);
}

#[test]
fn test_single_perfect_result() {
    let mut book = AchievementBook::new();
    let result = QuizResult::from_answers("2024-03-01T10:00:00Z", 10, 0, 0);

    let unlocked = book.evaluate_at(&[result], None, at(2024, 3, 1));

    assert_eq!(
        sorted(unlocked),
        sorted(vec![
            AchievementId::FirstQuiz,
            AchievementId::FirstWin,
            AchievementId::Perfect,
            AchievementId::Accuracy80,
            AchievementId::Accuracy90,
            AchievementId::NoSkip,
        ])
    );
    assert!(!book.is_unlocked(AchievementId::Streak3));
    assert!(!book.is_unlocked(AchievementId::Consistency));
    assert_eq!(book.progress(AchievementId::Rookie), Some(0.2));
}

#[test]
fn test_five_low_results_unlock_rookie_only_for_volume() {
    let mut book = AchievementBook::new();
    let results = consecutive_days(day(2024, 3, 1), 5, 10);

    let unlocked = book.evaluate_at(&results, None, at(2024, 3, 6));

    assert!(unlocked.contains(&AchievementId::Rookie));
    assert!(unlocked.contains(&AchievementId::FirstQuiz));
    assert!(!unlocked.contains(&AchievementId::FirstWin));
    assert_eq!(book.progress(AchievementId::Regular), Some(0.25));
    assert_eq!(book.progress(AchievementId::Grinder), Some(0.1));
}

#[test]
fn test_three_consecutive_days_unlock_streak_3() {
    let mut book = AchievementBook::new();
    let results = consecutive_days(day(2024, 3, 1), 3, 60);

    let unlocked = book.evaluate_at(&results, None, at(2024, 3, 3));

    assert!(unlocked.contains(&AchievementId::Streak3));
    assert!(!book.is_unlocked(AchievementId::Streak7));
    let progress = book.progress(AchievementId::Streak7).unwrap();
    assert!((progress - 3.0 / 7.0).abs() < 1e-9);
}

#[test]
fn test_gap_breaks_streak() {
    let mut book = AchievementBook::new();
    let results = vec![
        result_on(day(2024, 3, 1), 60),
        result_on(day(2024, 3, 2), 60),
        result_on(day(2024, 3, 4), 60),
    ];

    book.evaluate_at(&results, None, at(2024, 3, 4));

    assert!(!book.is_unlocked(AchievementId::Streak3));
    let progress = book.progress(AchievementId::Streak3).unwrap();
    assert!((progress - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_rank_badges() {
    let results = vec![result_on(day(2024, 3, 1), 60)];

    let mut first = AchievementBook::new();
    let unlocked = first.evaluate_at(&results, Some(1), at(2024, 3, 1));
    for id in [AchievementId::Top10, AchievementId::Top3, AchievementId::Champion] {
        assert!(unlocked.contains(&id), "{id} should unlock at rank 1");
    }

    let mut fifth = AchievementBook::new();
    let unlocked = fifth.evaluate_at(&results, Some(5), at(2024, 3, 1));
    assert!(unlocked.contains(&AchievementId::Top10));
    assert!(!unlocked.contains(&AchievementId::Top3));
    assert!(!unlocked.contains(&AchievementId::Champion));

    let mut unranked = AchievementBook::new();
    let unlocked = unranked.evaluate_at(&results, None, at(2024, 3, 1));
    assert!(!unlocked.contains(&AchievementId::Top10));
}

#[test]
fn test_comeback_needs_thirty_points() {
    let enough = vec![result_on(day(2024, 3, 1), 40), result_on(day(2024, 3, 2), 75)];
    let mut book = AchievementBook::new();
    assert!(book
        .evaluate_at(&enough, None, at(2024, 3, 2))
        .contains(&AchievementId::Comeback));

    let short = vec![result_on(day(2024, 3, 1), 40), result_on(day(2024, 3, 2), 60)];
    let mut book = AchievementBook::new();
    assert!(!book
        .evaluate_at(&short, None, at(2024, 3, 2))
        .contains(&AchievementId::Comeback));
}

#[test]
fn test_comeback_uses_dates_not_input_order() {
    // Newest first in the slice; the latest result is still the 75%
    let results = vec![result_on(day(2024, 3, 2), 75), result_on(day(2024, 3, 1), 40)];
    let mut book = AchievementBook::new();
    book.evaluate_at(&results, None, at(2024, 3, 2));
    assert!(book.is_unlocked(AchievementId::Comeback));
}

#[test]
fn test_consistency_looks_at_last_three() {
    let mut results = consecutive_days(day(2024, 3, 1), 3, 80);
    results.insert(0, result_on(day(2024, 2, 1), 10));

    let mut book = AchievementBook::new();
    book.evaluate_at(&results, None, at(2024, 3, 3));
    assert!(book.is_unlocked(AchievementId::Consistency));

    let mut results = consecutive_days(day(2024, 3, 1), 3, 80);
    results[2].percentage = Some(65);
    let mut book = AchievementBook::new();
    book.evaluate_at(&results, None, at(2024, 3, 3));
    assert!(!book.is_unlocked(AchievementId::Consistency));
    let progress = book.progress(AchievementId::Consistency).unwrap();
    assert!((progress - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_hard_quizzes_count_only_good_hard_results() {
    let hard = |d, pct| {
        let mut r = result_on(day(2024, 3, d), pct);
        r.difficulty = Some(quizbadge::Difficulty::Hard);
        r
    };
    let results = vec![hard(1, 70), hard(2, 69), hard(3, 100), result_on(day(2024, 3, 4), 100)];

    let mut book = AchievementBook::new();
    book.evaluate_at(&results, None, at(2024, 3, 4));
    assert!(!book.is_unlocked(AchievementId::DifficultyHard));
    let progress = book.progress(AchievementId::DifficultyHard).unwrap();
    assert!((progress - 2.0 / 3.0).abs() < 1e-9);

    let mut more = results.clone();
    more.push(hard(5, 90));
    book.evaluate_at(&more, None, at(2024, 3, 5));
    assert!(book.is_unlocked(AchievementId::DifficultyHard));
}

#[test]
fn test_thousand_club_sums_scores() {
    let results: Vec<_> = (0..10)
        .map(|i| {
            let mut r = result_on(day(2024, 1, 1) + chrono::Duration::days(i), 100);
            r.score = Some(100);
            r.total_questions = 100;
            r
        })
        .collect();

    let mut book = AchievementBook::new();
    let unlocked = book.evaluate_at(&results, None, at(2024, 1, 11));
    assert!(unlocked.contains(&AchievementId::ThousandClub));

    let mut partial = AchievementBook::new();
    partial.evaluate_at(&results[..4], None, at(2024, 1, 5));
    assert_eq!(partial.progress(AchievementId::ThousandClub), Some(0.4));
}
