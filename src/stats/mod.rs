//! Quiz statistics: history, leaderboard, and achievements
//!
//! Everything is stored as JSON blobs in a local SQLite key/value table
//! (`~/.quizbadge/storage.db`).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ HistoryStore │   │ Leaderboard  │   │ AchievementBook  │
//! │ quiz_history:│   │ leaderboard  │   │ achievements:    │
//! └──────┬───────┘   └──────┬───────┘   └────────┬─────────┘
//!        └──────────────────┼────────────────────┘
//!                           ▼
//!                      LocalStore
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let tracker = QuizTracker::open(&Config::load()?)?;
//!
//! // Record a finished quiz and evaluate badges
//! let unlocked = tracker.complete_quiz("alice", &result)?;
//!
//! // Render the badge grid
//! let badges = tracker.achievements("alice")?.list();
//! ```

pub mod achievements;
mod db;
mod error;
mod history;
mod leaderboard;
pub mod time_bucket;

pub use achievements::{
    Achievement, AchievementBook, AchievementCategory, AchievementId, Badge, BadgeFilter,
    Rarity, StreakInfo, UnlockFilter, UnlockedAchievement,
};
pub use db::LocalStore;
pub use error::TrackerError;
pub use history::HistoryStore;
pub use leaderboard::{Leaderboard, LeaderboardEntry};

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::domain::QuizResult;
use achievements::StoredBadges;
use error::normalize_user;

const ACHIEVEMENTS_PREFIX: &str = "achievements:";

/// Default leaderboard capacity when no config is supplied
const DEFAULT_LEADERBOARD_SIZE: usize = 100;

/// Central manager for quiz statistics
///
/// Coordinates the history, leaderboard, and achievement stores.
/// Cheap to clone; all clones share one storage connection.
#[derive(Clone)]
pub struct QuizTracker {
    db: LocalStore,
    leaderboard_size: usize,
}

impl QuizTracker {
    /// Open the tracker described by a configuration
    pub fn open(config: &Config) -> Result<Self> {
        let db = LocalStore::open(&config.storage_path())?;
        Ok(Self::with_store(db, config.settings.leaderboard_size))
    }

    /// Create a tracker with a custom database path
    pub fn with_path(path: &Path) -> Result<Self> {
        let db = LocalStore::open(path)?;
        Ok(Self::with_store(db, DEFAULT_LEADERBOARD_SIZE))
    }

    pub fn with_store(db: LocalStore, leaderboard_size: usize) -> Self {
        Self {
            db,
            leaderboard_size,
        }
    }

    pub fn history(&self) -> HistoryStore {
        HistoryStore::new(self.db.clone())
    }

    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::new(self.db.clone(), self.leaderboard_size)
    }

    // ========================================
    // ACHIEVEMENT STATE
    // ========================================

    /// Load a user's badge book; a missing or unreadable blob yields a fresh book
    pub fn achievements(&self, user: &str) -> Result<AchievementBook> {
        let key = achievements_key(user)?;
        match self.db.get_json::<StoredBadges>(&key) {
            Ok(Some(stored)) => Ok(AchievementBook::from_stored(stored)),
            Ok(None) => Ok(AchievementBook::new()),
            Err(e) => {
                tracing::warn!("Achievement state for {} is unreadable, starting fresh: {:#}", user.trim(), e);
                Ok(AchievementBook::new())
            }
        }
    }

    pub fn save_achievements(&self, user: &str, book: &AchievementBook) -> Result<()> {
        let key = achievements_key(user)?;
        self.db.set_json(&key, &book.to_stored())
    }

    // ========================================
    // MAIN FLOWS
    // ========================================

    /// Record a finished quiz, update the leaderboard, and evaluate badges.
    ///
    /// Returns the achievements unlocked by this quiz.
    pub fn complete_quiz(&self, user: &str, result: &QuizResult) -> Result<Vec<UnlockedAchievement>> {
        self.complete_quiz_at(user, result, Utc::now())
    }

    pub fn complete_quiz_at(
        &self,
        user: &str,
        result: &QuizResult,
        now: DateTime<Utc>,
    ) -> Result<Vec<UnlockedAchievement>> {
        let user = normalize_user(user)?;

        self.history().append(user, result)?;
        self.leaderboard()
            .submit(LeaderboardEntry::from_result(user, result))?;

        self.evaluate_user_at(user, now)
    }

    /// Re-evaluate a user's badges against their stored history and current rank
    pub fn evaluate_user(&self, user: &str) -> Result<Vec<UnlockedAchievement>> {
        self.evaluate_user_at(user, Utc::now())
    }

    pub fn evaluate_user_at(&self, user: &str, now: DateTime<Utc>) -> Result<Vec<UnlockedAchievement>> {
        let user = normalize_user(user)?;

        let results = self.history().load(user)?;
        let rank = self.leaderboard().user_rank(user)?;

        let mut book = self.achievements(user)?;
        let newly_unlocked = book.evaluate_at(&results, rank, now);
        self.save_achievements(user, &book)?;

        if newly_unlocked.is_empty() {
            tracing::debug!("No new achievements for {}", user);
        } else {
            tracing::info!("{} unlocked {} achievement(s)", user, newly_unlocked.len());
        }

        Ok(book.describe_unlocks(&newly_unlocked))
    }

    /// Lock all of a user's badges again
    pub fn reset_achievements(&self, user: &str) -> Result<()> {
        let mut book = self.achievements(user)?;
        book.reset();
        self.save_achievements(user, &book)
    }

    /// Daily streak figures for a user's history
    pub fn streaks(&self, user: &str) -> Result<StreakInfo> {
        let results = self.history().load(user)?;
        Ok(StreakInfo::from_results(&results))
    }

    /// Remove a user's history and badge state (logout / clear data).
    ///
    /// Leaderboard entries stay, since the board is shared.
    pub fn forget_user(&self, user: &str) -> Result<()> {
        self.history().clear(user)?;
        self.db.remove(&achievements_key(user)?)?;
        tracing::info!("Cleared stored data for {}", user.trim());
        Ok(())
    }

    /// Delete all stored data (reset to empty state)
    pub fn reset_all(&self) -> Result<()> {
        self.db.clear()
    }
}

fn achievements_key(user: &str) -> Result<String, TrackerError> {
    Ok(format!("{}{}", ACHIEVEMENTS_PREFIX, normalize_user(user)?))
}
