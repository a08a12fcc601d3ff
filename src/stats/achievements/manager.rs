//! Achievement book - per-user badge state and the evaluation loop
//!
//! Holds the mutable half of every badge (unlocked, progress, unlock time) and
//! applies rule outcomes to it. Unlocks are one-way; only [`AchievementBook::reset`]
//! locks a badge again.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::checker::{check_achievement, EvaluationContext};
use super::definitions::{Achievement, AchievementCategory, AchievementId, Rarity, ACHIEVEMENTS};
use crate::domain::QuizResult;

/// Mutable state of one badge, as persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeState {
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl BadgeState {
    /// Initial state: locked, and zero progress for threshold badges
    fn locked(achievement: &Achievement) -> Self {
        Self {
            unlocked: false,
            progress: achievement.target.map(|_| 0.0),
            unlocked_at: None,
        }
    }

    /// Bring stored state back in line with the badge invariants
    fn normalized(mut self, achievement: &Achievement) -> Self {
        if achievement.is_threshold() {
            let progress = self.progress.filter(|p| p.is_finite()).unwrap_or(0.0);
            self.progress = Some(progress.clamp(0.0, 1.0));
        } else {
            self.progress = None;
        }

        if self.unlocked {
            if achievement.is_threshold() {
                self.progress = Some(1.0);
            }
            // Older blobs may lack the timestamp; keep the unlock but mark it epoch
            if self.unlocked_at.is_none() {
                self.unlocked_at = Some(DateTime::<Utc>::UNIX_EPOCH);
            }
        } else {
            self.unlocked_at = None;
        }
        self
    }
}

/// Snapshot of one badge for rendering: definition plus current state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
    pub category: AchievementCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Badge {
    fn new(achievement: &'static Achievement, state: &BadgeState) -> Self {
        Self {
            id: achievement.id,
            title: achievement.title,
            description: achievement.description,
            icon: achievement.icon,
            rarity: achievement.rarity,
            category: achievement.category,
            target: achievement.target,
            unlocked: state.unlocked,
            progress: state.progress,
            unlocked_at: state.unlocked_at,
        }
    }

    pub fn definition(&self) -> &'static Achievement {
        Achievement::get(self.id)
    }
}

/// An achievement that was just unlocked
#[derive(Debug, Clone)]
pub struct UnlockedAchievement {
    pub achievement: &'static Achievement,
    pub unlocked_at: DateTime<Utc>,
}

/// Persisted form: storage id -> state
pub type StoredBadges = BTreeMap<String, BadgeState>;

/// Badge map for one user
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementBook {
    states: BTreeMap<AchievementId, BadgeState>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementBook {
    /// Create a book with every badge locked
    pub fn new() -> Self {
        let states = ACHIEVEMENTS
            .iter()
            .map(|a| (a.id, BadgeState::locked(a)))
            .collect();
        Self { states }
    }

    /// Rebuild a book from persisted state.
    ///
    /// Unknown ids are dropped and missing ids start locked, so the badge set
    /// always matches the current catalogue.
    pub fn from_stored(stored: StoredBadges) -> Self {
        let mut book = Self::new();
        for (key, state) in stored {
            let Some(id) = AchievementId::parse(&key) else {
                tracing::debug!("Ignoring stored state for unknown achievement '{}'", key);
                continue;
            };
            book.states
                .insert(id, state.normalized(Achievement::get(id)));
        }
        book
    }

    /// Persisted form of this book
    pub fn to_stored(&self) -> StoredBadges {
        self.states
            .iter()
            .map(|(id, state)| (id.as_str().to_string(), state.clone()))
            .collect()
    }

    // ========================================
    // EVALUATION
    // ========================================

    /// Evaluate every rule against the history and rank, stamping unlocks with the current time.
    ///
    /// Returns exactly the ids that went from locked to unlocked in this call.
    pub fn evaluate(&mut self, results: &[QuizResult], rank: Option<u32>) -> Vec<AchievementId> {
        self.evaluate_at(results, rank, Utc::now())
    }

    /// Same as [`evaluate`](Self::evaluate) with an explicit unlock timestamp
    pub fn evaluate_at(
        &mut self,
        results: &[QuizResult],
        rank: Option<u32>,
        now: DateTime<Utc>,
    ) -> Vec<AchievementId> {
        let ctx = EvaluationContext::new(results, rank);
        tracing::debug!(
            results = ctx.result_count(),
            rank = ?ctx.rank(),
            longest_streak = ctx.longest_streak(),
            score_total = ctx.score_total(),
            "Evaluating achievements"
        );

        let mut newly_unlocked = Vec::new();

        for achievement in ACHIEVEMENTS {
            let Some(outcome) = check_achievement(achievement, &ctx) else {
                continue;
            };

            let state = self
                .states
                .entry(achievement.id)
                .or_insert_with(|| BadgeState::locked(achievement));

            if state.unlocked {
                continue;
            }

            if let Some(progress) = outcome.progress {
                state.progress = Some(progress);
            }

            if outcome.met {
                state.unlocked = true;
                state.unlocked_at = Some(now);
                if achievement.is_threshold() {
                    state.progress = Some(1.0);
                }
                tracing::info!("Achievement unlocked: {} ({})", achievement.title, achievement.id);
                newly_unlocked.push(achievement.id);
            }
        }

        newly_unlocked
    }

    /// Lock every badge again and clear all progress
    pub fn reset(&mut self) {
        for achievement in ACHIEVEMENTS {
            self.states
                .insert(achievement.id, BadgeState::locked(achievement));
        }
        tracing::debug!("Achievements reset");
    }

    // ========================================
    // QUERIES
    // ========================================

    /// Snapshot of every badge in catalogue order
    pub fn list(&self) -> Vec<Badge> {
        ACHIEVEMENTS
            .iter()
            .map(|a| Badge::new(a, &self.state_of(a)))
            .collect()
    }

    pub fn get(&self, id: AchievementId) -> Badge {
        let achievement = Achievement::get(id);
        Badge::new(achievement, &self.state_of(achievement))
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.states.get(&id).is_some_and(|s| s.unlocked)
    }

    pub fn progress(&self, id: AchievementId) -> Option<f64> {
        self.states.get(&id).and_then(|s| s.progress)
    }

    /// Get count of unlocked achievements
    pub fn unlocked_count(&self) -> usize {
        self.states.values().filter(|s| s.unlocked).count()
    }

    /// Attach definitions and timestamps to a list of freshly unlocked ids
    pub fn describe_unlocks(&self, ids: &[AchievementId]) -> Vec<UnlockedAchievement> {
        ids.iter()
            .filter_map(|id| {
                let state = self.states.get(id)?;
                Some(UnlockedAchievement {
                    achievement: Achievement::get(*id),
                    unlocked_at: state.unlocked_at?,
                })
            })
            .collect()
    }

    fn state_of(&self, achievement: &Achievement) -> BadgeState {
        self.states
            .get(&achievement.id)
            .cloned()
            .unwrap_or_else(|| BadgeState::locked(achievement))
    }
}
