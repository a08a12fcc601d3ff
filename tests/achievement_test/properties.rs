use quizbadge::stats::{AchievementBook, AchievementId};

use crate::common::{at, consecutive_days, day, result_on};

#[test]
fn test_evaluation_is_idempotent() {
    let results = consecutive_days(day(2024, 3, 1), 7, 95);
    let mut book = AchievementBook::new();

    let first = book.evaluate_at(&results, Some(2), at(2024, 3, 7));
    assert!(!first.is_empty());
    let after_first = book.clone();

    let second = book.evaluate_at(&results, Some(2), at(2024, 3, 8));
    assert!(second.is_empty());
    assert_eq!(book, after_first);
}

#[test]
fn test_reset_then_evaluate_is_deterministic() {
    let results = consecutive_days(day(2024, 3, 1), 4, 85);
    let now = at(2024, 3, 5);

    let mut fresh = AchievementBook::new();
    let fresh_unlocked = fresh.evaluate_at(&results, Some(7), now);

    let mut used = AchievementBook::new();
    used.evaluate_at(&consecutive_days(day(2023, 1, 1), 20, 100), Some(1), at(2023, 2, 1));
    used.reset();
    let used_unlocked = used.evaluate_at(&results, Some(7), now);

    assert_eq!(fresh_unlocked, used_unlocked);
    assert_eq!(fresh, used);
}

#[test]
fn test_unlocks_survive_shrinking_history() {
    let results = consecutive_days(day(2024, 3, 1), 5, 100);
    let mut book = AchievementBook::new();
    book.evaluate_at(&results, Some(1), at(2024, 3, 5));

    let unlocked_before: Vec<_> = book
        .list()
        .into_iter()
        .filter(|b| b.unlocked)
        .map(|b| (b.id, b.unlocked_at))
        .collect();

    let newly = book.evaluate_at(&[], None, at(2024, 3, 6));
    assert!(newly.is_empty());

    for (id, unlocked_at) in unlocked_before {
        let badge = book.get(id);
        assert!(badge.unlocked, "{id} was locked again");
        assert_eq!(badge.unlocked_at, unlocked_at);
    }
}

#[test]
fn test_returned_ids_match_state_changes() {
    let mut book = AchievementBook::new();
    let mut results = Vec::new();

    for offset in 0..10 {
        let before = book.clone();
        let percentage = 50 + offset as u32 * 5;
        results.push(result_on(day(2024, 4, 1) + chrono::Duration::days(offset), percentage));

        let mut newly = book.evaluate_at(&results, None, at(2024, 4, 20));
        newly.sort();
        let changed: Vec<AchievementId> = AchievementId::all()
            .iter()
            .copied()
            .filter(|id| !before.is_unlocked(*id) && book.is_unlocked(*id))
            .collect();

        assert_eq!(newly, changed);
    }
}

#[test]
fn test_progress_stays_in_range() {
    let mut book = AchievementBook::new();
    book.evaluate_at(&consecutive_days(day(2024, 3, 1), 60, 100), Some(1), at(2024, 5, 1));

    for badge in book.list() {
        if let Some(progress) = badge.progress {
            assert!((0.0..=1.0).contains(&progress), "{} progress {}", badge.id, progress);
        }
        if badge.unlocked && badge.target.is_some() {
            assert_eq!(badge.progress, Some(1.0));
        }
    }
}
