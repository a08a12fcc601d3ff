//! Gamification system: badges, progress, and daily streaks
//!
//! Rules live in a static catalogue; per-user state lives in an [`AchievementBook`].

mod checker;
mod definitions;
mod filter;
mod manager;
mod streaks;

pub use checker::{check_achievement, EvaluationContext, Outcome};
pub use definitions::{Achievement, AchievementCategory, AchievementId, Rarity, Rule, ACHIEVEMENTS};
pub use filter::{BadgeFilter, UnlockFilter};
pub use manager::{AchievementBook, Badge, BadgeState, StoredBadges, UnlockedAchievement};
pub use streaks::StreakInfo;
