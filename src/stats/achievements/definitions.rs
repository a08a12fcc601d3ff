//! Achievement definitions and metadata
//!
//! Every badge is defined here together with the rule that unlocks it.
//! Catalogue order is also evaluation order and the order unlocks are reported in.

use serde::{Deserialize, Serialize};

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    // Milestone achievements
    FirstQuiz,
    FirstWin,
    Perfect,
    Comeback,
    #[serde(rename = "accuracy_80")]
    Accuracy80,
    #[serde(rename = "accuracy_90")]
    Accuracy90,
    NoSkip,

    // Rank achievements
    #[serde(rename = "top10")]
    Top10,
    #[serde(rename = "top3")]
    Top3,
    Champion,

    // Quality achievements
    Consistency,

    // Volume achievements
    Rookie,
    Regular,
    Grinder,

    // Score achievements
    ThousandClub,

    // Difficulty achievements
    DifficultyHard,

    // Streak achievements
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "streak_14")]
    Streak14,
}

impl AchievementId {
    /// Get the string ID used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstQuiz => "first_quiz",
            Self::FirstWin => "first_win",
            Self::Perfect => "perfect",
            Self::Comeback => "comeback",
            Self::Accuracy80 => "accuracy_80",
            Self::Accuracy90 => "accuracy_90",
            Self::NoSkip => "no_skip",
            Self::Top10 => "top10",
            Self::Top3 => "top3",
            Self::Champion => "champion",
            Self::Consistency => "consistency",
            Self::Rookie => "rookie",
            Self::Regular => "regular",
            Self::Grinder => "grinder",
            Self::ThousandClub => "thousand_club",
            Self::DifficultyHard => "difficulty_hard",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak14 => "streak_14",
        }
    }

    /// Parse from a storage string
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|id| id.as_str() == s)
    }

    /// Get all achievement IDs
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstQuiz,
            Self::FirstWin,
            Self::Perfect,
            Self::Comeback,
            Self::Accuracy80,
            Self::Accuracy90,
            Self::NoSkip,
            Self::Top10,
            Self::Top3,
            Self::Champion,
            Self::Consistency,
            Self::Rookie,
            Self::Regular,
            Self::Grinder,
            Self::ThousandClub,
            Self::DifficultyHard,
            Self::Streak3,
            Self::Streak7,
            Self::Streak14,
        ]
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display tier. Purely cosmetic, never consulted by unlock rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Some(Self::Common),
            "rare" => Some(Self::Rare),
            "epic" => Some(Self::Epic),
            "legendary" => Some(Self::Legendary),
            _ => None,
        }
    }
}

/// Achievement category for grouping in the badge grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Milestone,
    Rank,
    Quality,
    Volume,
    Score,
    Difficulty,
    Streak,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Milestone => "Milestones",
            Self::Rank => "Leaderboard",
            Self::Quality => "Quality",
            Self::Volume => "Volume",
            Self::Score => "Score",
            Self::Difficulty => "Difficulty",
            Self::Streak => "Streaks",
        }
    }
}

/// Unlock condition for an achievement.
///
/// Threshold rules (`QuizCount`, `ScoreTotal`, `HardQuizzes`, `DailyStreak`,
/// `RecentQuality`) normalize their progress against the achievement's `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// At least one recorded result
    AnyResult,
    /// Some result reaches the percentage
    PercentageAtLeast(u32),
    /// Some result scored exactly 100%
    PerfectScore,
    /// Some result skipped no questions
    NoSkippedQuestions,
    /// Latest result beats the one before it by at least `min_gain` points
    Comeback { min_gain: u32 },
    /// Current leaderboard rank is at or above this position
    RankAtMost(u32),
    /// Every one of the `window` most recent results reaches `min_percentage`
    RecentQuality { window: usize, min_percentage: u32 },
    /// Number of recorded results
    QuizCount,
    /// Sum of scores across all results
    ScoreTotal,
    /// Results played on hard that reach `min_percentage`
    HardQuizzes { min_percentage: u32 },
    /// Longest run of consecutive days with at least one result
    DailyStreak,
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
    pub category: AchievementCategory,
    /// For threshold achievements, the value progress is normalized against
    pub target: Option<u32>,
    #[serde(skip)]
    pub rule: Rule,
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[Achievement] = &[
    // === MILESTONE ===
    Achievement {
        id: AchievementId::FirstQuiz,
        title: "First Steps",
        description: "Finish your first quiz",
        icon: "🎯",
        rarity: Rarity::Common,
        category: AchievementCategory::Milestone,
        target: None,
        rule: Rule::AnyResult,
    },
    Achievement {
        id: AchievementId::FirstWin,
        title: "First Win",
        description: "Score at least 50% on a quiz",
        icon: "🥉",
        rarity: Rarity::Common,
        category: AchievementCategory::Milestone,
        target: None,
        rule: Rule::PercentageAtLeast(50),
    },
    Achievement {
        id: AchievementId::Perfect,
        title: "Flawless",
        description: "Answer every question of a quiz correctly",
        icon: "💎",
        rarity: Rarity::Epic,
        category: AchievementCategory::Milestone,
        target: None,
        rule: Rule::PerfectScore,
    },
    Achievement {
        id: AchievementId::Comeback,
        title: "Comeback Kid",
        description: "Improve on your previous quiz by 30 points or more",
        icon: "📈",
        rarity: Rarity::Rare,
        category: AchievementCategory::Milestone,
        target: None,
        rule: Rule::Comeback { min_gain: 30 },
    },
    Achievement {
        id: AchievementId::Accuracy80,
        title: "Sharpshooter",
        description: "Score at least 80% on a quiz",
        icon: "🏹",
        rarity: Rarity::Common,
        category: AchievementCategory::Milestone,
        target: None,
        rule: Rule::PercentageAtLeast(80),
    },
    Achievement {
        id: AchievementId::Accuracy90,
        title: "Marksman",
        description: "Score at least 90% on a quiz",
        icon: "🎖️",
        rarity: Rarity::Rare,
        category: AchievementCategory::Milestone,
        target: None,
        rule: Rule::PercentageAtLeast(90),
    },
    Achievement {
        id: AchievementId::NoSkip,
        title: "No Stone Unturned",
        description: "Finish a quiz without skipping a question",
        icon: "🧗",
        rarity: Rarity::Common,
        category: AchievementCategory::Milestone,
        target: None,
        rule: Rule::NoSkippedQuestions,
    },
    // === RANK ===
    Achievement {
        id: AchievementId::Top10,
        title: "Top Ten",
        description: "Reach the top 10 of the leaderboard",
        icon: "🔟",
        rarity: Rarity::Rare,
        category: AchievementCategory::Rank,
        target: None,
        rule: Rule::RankAtMost(10),
    },
    Achievement {
        id: AchievementId::Top3,
        title: "Podium",
        description: "Reach the top 3 of the leaderboard",
        icon: "🥈",
        rarity: Rarity::Epic,
        category: AchievementCategory::Rank,
        target: None,
        rule: Rule::RankAtMost(3),
    },
    Achievement {
        id: AchievementId::Champion,
        title: "Champion",
        description: "Take first place on the leaderboard",
        icon: "🏆",
        rarity: Rarity::Legendary,
        category: AchievementCategory::Rank,
        target: None,
        rule: Rule::RankAtMost(1),
    },
    // === QUALITY ===
    Achievement {
        id: AchievementId::Consistency,
        title: "Steady Hand",
        description: "Score 70% or more on your last 3 quizzes",
        icon: "⚖️",
        rarity: Rarity::Rare,
        category: AchievementCategory::Quality,
        target: Some(3),
        rule: Rule::RecentQuality {
            window: 3,
            min_percentage: 70,
        },
    },
    // === VOLUME ===
    Achievement {
        id: AchievementId::Rookie,
        title: "Rookie",
        description: "Finish 5 quizzes",
        icon: "🐣",
        rarity: Rarity::Common,
        category: AchievementCategory::Volume,
        target: Some(5),
        rule: Rule::QuizCount,
    },
    Achievement {
        id: AchievementId::Regular,
        title: "Regular",
        description: "Finish 20 quizzes",
        icon: "📚",
        rarity: Rarity::Rare,
        category: AchievementCategory::Volume,
        target: Some(20),
        rule: Rule::QuizCount,
    },
    Achievement {
        id: AchievementId::Grinder,
        title: "Grinder",
        description: "Finish 50 quizzes",
        icon: "⚙️",
        rarity: Rarity::Epic,
        category: AchievementCategory::Volume,
        target: Some(50),
        rule: Rule::QuizCount,
    },
    // === SCORE ===
    Achievement {
        id: AchievementId::ThousandClub,
        title: "Thousand Club",
        description: "Collect 1000 points across all quizzes",
        icon: "💰",
        rarity: Rarity::Epic,
        category: AchievementCategory::Score,
        target: Some(1000),
        rule: Rule::ScoreTotal,
    },
    // === DIFFICULTY ===
    Achievement {
        id: AchievementId::DifficultyHard,
        title: "Hardened",
        description: "Score 70% or more on 3 hard quizzes",
        icon: "🧠",
        rarity: Rarity::Rare,
        category: AchievementCategory::Difficulty,
        target: Some(3),
        rule: Rule::HardQuizzes { min_percentage: 70 },
    },
    // === STREAK ===
    Achievement {
        id: AchievementId::Streak3,
        title: "On Fire",
        description: "Play on 3 consecutive days",
        icon: "🔥",
        rarity: Rarity::Common,
        category: AchievementCategory::Streak,
        target: Some(3),
        rule: Rule::DailyStreak,
    },
    Achievement {
        id: AchievementId::Streak7,
        title: "Week Warrior",
        description: "Play on 7 consecutive days",
        icon: "📅",
        rarity: Rarity::Rare,
        category: AchievementCategory::Streak,
        target: Some(7),
        rule: Rule::DailyStreak,
    },
    Achievement {
        id: AchievementId::Streak14,
        title: "Unstoppable",
        description: "Play on 14 consecutive days",
        icon: "👑",
        rarity: Rarity::Legendary,
        category: AchievementCategory::Streak,
        target: Some(14),
        rule: Rule::DailyStreak,
    },
];

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> &'static Achievement {
        ACHIEVEMENTS
            .iter()
            .find(|a| a.id == id)
            .expect("All achievements should be defined")
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }

    /// Whether this achievement tracks fractional progress
    pub fn is_threshold(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_matches_id_list() {
        let ids: Vec<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids, AchievementId::all());
    }

    #[test]
    fn test_ids_are_unique() {
        let unique: HashSet<_> = ACHIEVEMENTS.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(unique.len(), Achievement::total_count());
    }

    #[test]
    fn test_parse_roundtrips_storage_ids() {
        for id in AchievementId::all() {
            assert_eq!(AchievementId::parse(id.as_str()), Some(*id));
        }
        assert_eq!(AchievementId::parse("streak_30"), None);
    }

    #[test]
    fn test_serde_names_match_storage_ids() {
        for id in AchievementId::all() {
            let json = serde_json::to_string(id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_threshold_rules_declare_targets() {
        for achievement in ACHIEVEMENTS {
            let needs_target = matches!(
                achievement.rule,
                Rule::RecentQuality { .. }
                    | Rule::QuizCount
                    | Rule::ScoreTotal
                    | Rule::HardQuizzes { .. }
                    | Rule::DailyStreak
            );
            assert_eq!(
                achievement.target.is_some(),
                needs_target,
                "{} target mismatch",
                achievement.id
            );
        }
    }

    #[test]
    fn test_rarity_parse() {
        assert_eq!(Rarity::parse("Legendary"), Some(Rarity::Legendary));
        assert_eq!(Rarity::parse("mythic"), None);
    }
}
